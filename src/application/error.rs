//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{DomainError, ValidationError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Boundary dataset unreachable or unparseable.
    #[error("cannot load boundary data from {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },

    /// Persisted registry present but unusable.
    #[error("stored registry '{key}' is corrupt: {reason}")]
    PersistenceCorrupt { key: String, reason: String },

    /// Registry slot could not be read or written.
    #[error("registry storage '{key}' failed")]
    Persistence {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ValidationError> for ApplicationError {
    fn from(e: ValidationError) -> Self {
        ApplicationError::Domain(DomainError::Validation(e))
    }
}

impl ApplicationError {
    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            ApplicationError::Domain(DomainError::Validation(e)) => Some(*e),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
