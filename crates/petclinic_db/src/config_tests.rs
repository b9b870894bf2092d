//! Tests for config module

use super::*;

#[test]
fn test_initialization_mode_parses_case_insensitively() {
    assert_eq!(
        "ALWAYS".parse::<InitializationMode>(),
        Ok(InitializationMode::Always)
    );
    assert_eq!(
        " never ".parse::<InitializationMode>(),
        Ok(InitializationMode::Never)
    );
    assert_eq!(
        "embedded".parse::<InitializationMode>(),
        Ok(InitializationMode::Embedded)
    );
}

#[test]
fn test_unknown_initialization_mode_is_rejected() {
    let err = "sometimes".parse::<InitializationMode>().unwrap_err();
    assert_eq!(err, ParseInitializationModeError("sometimes".to_string()));
}

#[test]
fn test_only_always_runs_scripts_on_mysql() {
    assert!(InitializationMode::Always.runs_scripts());
    assert!(!InitializationMode::Embedded.runs_scripts());
    assert!(!InitializationMode::Never.runs_scripts());
}

#[test]
fn test_initialization_mode_display_round_trips() {
    for mode in [
        InitializationMode::Always,
        InitializationMode::Embedded,
        InitializationMode::Never,
    ] {
        assert_eq!(mode.to_string().parse::<InitializationMode>(), Ok(mode));
    }
}

#[test]
fn test_new_uses_defaults() {
    let config = DataSourceConfig::new("mysql://localhost/petclinic");

    assert_eq!(config.username, None);
    assert_eq!(config.initialization_mode, InitializationMode::Embedded);
    assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
}

#[test]
fn test_jdbc_prefix_is_stripped() {
    let config = DataSourceConfig::new("jdbc:mysql://db:3306/petclinic");
    assert_eq!(config.driver_url(), "mysql://db:3306/petclinic");

    let config = DataSourceConfig::new("mysql://db:3306/petclinic");
    assert_eq!(config.driver_url(), "mysql://db:3306/petclinic");
}

#[test]
fn test_debug_redacts_password() {
    let config =
        DataSourceConfig::new("mysql://localhost/petclinic").with_credentials("root", "s3cret");

    let printed = format!("{:?}", config);

    assert!(printed.contains("root"));
    assert!(!printed.contains("s3cret"));
}

#[test]
fn test_deserializes_kebab_case_keys() {
    let json = serde_json::json!({
        "url": "mysql://localhost/petclinic",
        "username": "petclinic",
        "initialization-mode": "always"
    });

    let config: DataSourceConfig = serde_json::from_value(json).unwrap();

    assert_eq!(config.username.as_deref(), Some("petclinic"));
    assert_eq!(config.password, None);
    assert_eq!(config.initialization_mode, InitializationMode::Always);
    assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
}
