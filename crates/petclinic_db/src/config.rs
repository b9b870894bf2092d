//! Datasource configuration.
//!
//! A [`DataSourceConfig`] says where the database is and whether the schema
//! should be created on startup. It is a plain value: the binary fills it
//! from configuration files and the environment, the integration harness
//! fills it from a running container.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection, in seconds.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// When to run the schema and seed scripts at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitializationMode {
    /// Always run the scripts.
    Always,

    /// Run the scripts only for embedded databases. MySQL is never embedded,
    /// so for this crate it behaves like `Never`.
    #[default]
    Embedded,

    /// Never run the scripts.
    Never,
}

impl InitializationMode {
    /// Whether the scripts should run against a MySQL server.
    pub fn runs_scripts(self) -> bool {
        matches!(self, InitializationMode::Always)
    }
}

impl fmt::Display for InitializationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitializationMode::Always => "always",
            InitializationMode::Embedded => "embedded",
            InitializationMode::Never => "never",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown initialization mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown initialization mode '{0}', expected always, embedded or never")]
pub struct ParseInitializationModeError(pub String);

impl FromStr for InitializationMode {
    type Err = ParseInitializationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(InitializationMode::Always),
            "embedded" => Ok(InitializationMode::Embedded),
            "never" => Ok(InitializationMode::Never),
            _ => Err(ParseInitializationModeError(s.to_string())),
        }
    }
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout_secs() -> u64 {
    DEFAULT_ACQUIRE_TIMEOUT_SECS
}

/// Connection settings for the MySQL datasource.
///
/// `url` takes the form `mysql://host:port/database`; a leading `jdbc:` is
/// accepted and ignored. Credentials given here take precedence over any
/// embedded in the URL.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DataSourceConfig {
    pub url: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub initialization_mode: InitializationMode,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl DataSourceConfig {
    /// Settings for `url` with defaults for everything else.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            initialization_mode: InitializationMode::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_initialization_mode(mut self, mode: InitializationMode) -> Self {
        self.initialization_mode = mode;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// The URL in the form the driver understands.
    pub fn driver_url(&self) -> &str {
        self.url.strip_prefix("jdbc:").unwrap_or(&self.url)
    }
}

// Hand written so the password never reaches the logs.
impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("initialization_mode", &self.initialization_mode)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}
