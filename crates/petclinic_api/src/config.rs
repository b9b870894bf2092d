//! Application configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file named
//! by `PETCLINIC_CONFIG`, then individual environment variables. Environment
//! lookup is passed in as a function so the layering can be exercised without
//! touching the process environment.
//!
//! # Example file
//!
//! ```toml
//! profile = "mysql"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 9966
//!
//! [datasource]
//! url = "mysql://localhost:3306/petclinic"
//! username = "petclinic"
//! password = "petclinic"
//! initialization-mode = "always"
//!
//! [cache]
//! ttl-secs = 60
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use petclinic_core::CacheConfig;
use petclinic_db::{DataSourceConfig, InitializationMode};
use serde::{Deserialize, Serialize};

use crate::server::ApiConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Path of the optional TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "PETCLINIC_CONFIG";
pub const PROFILE_VAR: &str = "PETCLINIC_PROFILE";
pub const HOST_VAR: &str = "API_HOST";
pub const PORT_VAR: &str = "API_PORT";
pub const DATASOURCE_URL_VAR: &str = "DATASOURCE_URL";
pub const DATASOURCE_USERNAME_VAR: &str = "DATASOURCE_USERNAME";
pub const DATASOURCE_PASSWORD_VAR: &str = "DATASOURCE_PASSWORD";
pub const DATASOURCE_INITIALIZATION_MODE_VAR: &str = "DATASOURCE_INITIALIZATION_MODE";
pub const CACHE_TTL_VAR: &str = "VETS_CACHE_TTL_SECS";
pub const CACHE_CAPACITY_VAR: &str = "VETS_CACHE_MAX_CAPACITY";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("the {0} profile requires a datasource url")]
    MissingDatasource(Profile),
}

/// Storage back end selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Seeded in-memory store
    #[default]
    Memory,

    /// MySQL through `petclinic_db`
    Mysql,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Memory => write!(f, "memory"),
            Profile::Mysql => write!(f, "mysql"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Profile::Memory),
            "mysql" => Ok(Profile::Mysql),
            _ => Err("expected memory or mysql".to_string()),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profile: Profile,
    pub server: ApiConfig,
    pub datasource: Option<DataSourceConfig>,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// an override has an invalid value, or the resulting configuration is
    /// inconsistent (see [`AppConfig::validate`]).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };

        let config = base.with_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file. Missing sections take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides on top of this configuration.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PROFILE_VAR) {
            self.profile = parse_value(PROFILE_VAR, &value)?;
        }
        if let Some(value) = lookup(HOST_VAR) {
            self.server.host = value;
        }
        if let Some(value) = lookup(PORT_VAR) {
            self.server.port = parse_value(PORT_VAR, &value)?;
        }

        if let Some(url) = lookup(DATASOURCE_URL_VAR) {
            self.datasource = Some(match self.datasource.take() {
                Some(existing) => DataSourceConfig { url, ..existing },
                None => DataSourceConfig::new(url),
            });
        }

        let datasource_overrides = [
            DATASOURCE_USERNAME_VAR,
            DATASOURCE_PASSWORD_VAR,
            DATASOURCE_INITIALIZATION_MODE_VAR,
        ];
        for key in datasource_overrides {
            let Some(value) = lookup(key) else {
                continue;
            };
            let Some(datasource) = self.datasource.as_mut() else {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: redact(key, value),
                    reason: format!("requires {} to be set", DATASOURCE_URL_VAR),
                });
            };
            match key {
                DATASOURCE_USERNAME_VAR => datasource.username = Some(value),
                DATASOURCE_PASSWORD_VAR => datasource.password = Some(value),
                _ => {
                    datasource.initialization_mode =
                        parse_value::<InitializationMode>(key, &value)?
                }
            }
        }

        if let Some(value) = lookup(CACHE_TTL_VAR) {
            self.cache.ttl_secs = parse_value(CACHE_TTL_VAR, &value)?;
        }
        if let Some(value) = lookup(CACHE_CAPACITY_VAR) {
            self.cache.max_capacity = parse_value(CACHE_CAPACITY_VAR, &value)?;
        }

        Ok(self)
    }

    /// Check that the profile has what it needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile == Profile::Mysql && self.datasource.is_none() {
            return Err(ConfigError::MissingDatasource(self.profile));
        }
        Ok(())
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn redact(key: &str, value: String) -> String {
    if key == DATASOURCE_PASSWORD_VAR {
        "[redacted]".to_string()
    } else {
        value
    }
}
