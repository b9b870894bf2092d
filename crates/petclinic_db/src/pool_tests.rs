//! Tests for pool module

use super::*;

#[test]
fn test_credentials_override_url() {
    let config = DataSourceConfig::new("jdbc:mysql://db.internal:3307/test")
        .with_credentials("petclinic", "petclinic");

    let options = connect_options(&config).unwrap();

    assert_eq!(options.get_host(), "db.internal");
    assert_eq!(options.get_port(), 3307);
    assert_eq!(options.get_username(), "petclinic");
    assert_eq!(options.get_database(), Some("test"));
}

#[test]
fn test_url_credentials_kept_without_override() {
    let config = DataSourceConfig::new("mysql://root@localhost/test");

    let options = connect_options(&config).unwrap();

    assert_eq!(options.get_username(), "root");
}

#[test]
fn test_invalid_url_is_reported() {
    let config = DataSourceConfig::new("mysql://localhost:notaport/test");

    let err = connect_options(&config).unwrap_err();

    assert!(matches!(err, DbError::InvalidUrl { .. }), "{:?}", err);
}
