//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Parcel identifier cannot be empty")]
    EmptyIdentifier,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid draw mode: {0}")]
    InvalidDrawMode(String),

    #[error("Unsupported coordinate reference system: {0}")]
    UnsupportedCrs(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::EmptyIdentifier.is_cancelled());
        assert!(!DomainError::InvalidColor("teal".to_string()).is_cancelled());
    }
}
