//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Domain errors represent business rule violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),
}
