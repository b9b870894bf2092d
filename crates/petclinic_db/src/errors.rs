//! Error types for MySQL storage.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias for storage operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while talking to MySQL.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The datasource URL could not be parsed into connection options.
    #[error("invalid datasource url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    /// A statement of an initialization script failed.
    #[error("statement {index} of {script} failed: {source}")]
    Script {
        script: &'static str,
        index: usize,
        #[source]
        source: sqlx::Error,
    },

    /// A database generated identifier does not fit the domain id type.
    #[error("generated id {0} is out of range")]
    IdOutOfRange(u64),

    /// Any other driver failure.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A domain rule failed while the operation was running.
    #[error(transparent)]
    Domain(#[from] petclinic_core::Error),
}

impl From<DbError> for petclinic_core::Error {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(inner) => inner,
            other => petclinic_core::Error::Storage(other.to_string()),
        }
    }
}
