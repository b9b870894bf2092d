//! Error types for the Pet Clinic domain.
//!
//! Every repository operation and validation rule reports failures through
//! [`Error`]. Storage back ends convert their own errors into
//! [`Error::Storage`] so callers never depend on a particular driver.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias used throughout the domain layer.
pub type PetClinicResult<T> = Result<T, Error>;

/// Errors raised by domain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested entity does not exist.
    ///
    /// `entity` is a lowercase entity name such as `owner` or `pet`.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// A write payload failed validation.
    ///
    /// `field` uses the camelCase name exposed over HTTP.
    #[error("validation failed for field '{field}': {message}")]
    Validation { field: String, message: String },

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The application was configured inconsistently.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a not found error for the given entity.
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Error::NotFound { entity, id }
    }

    /// Create a validation error for a single field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a storage error from anything printable.
    pub fn storage(message: impl std::fmt::Display) -> Self {
        Error::Storage(message.to_string())
    }

    /// Returns true when this error means the entity is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
