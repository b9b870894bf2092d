//! Tests for errors module

use super::*;

#[test]
fn test_not_found_message_names_entity_and_id() {
    let err = Error::not_found("owner", 42);
    assert_eq!(err.to_string(), "owner with id 42 not found");
    assert!(err.is_not_found());
}

#[test]
fn test_validation_message_names_field() {
    let err = Error::validation("telephone", "must be 10 digits");
    assert_eq!(
        err.to_string(),
        "validation failed for field 'telephone': must be 10 digits"
    );
    assert!(!err.is_not_found());
}

#[test]
fn test_storage_accepts_display_values() {
    let err = Error::storage(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "refused",
    ));
    assert_eq!(err, Error::Storage("refused".to_string()));
}
