//! Error policy port for per-parcel failures.
//!
//! When a parcel cannot be fetched or classified the orchestrator asks this
//! port whether to skip it, skip every later failure too, or stop.
//!
//! # Architecture
//!
//! - **Port**: [`ErrorPolicyPort`] - defined here in application layer
//! - **Adapter**: `InteractiveErrorPolicy` - implemented in presentation layer
//!
//! # Built-in Implementations
//!
//! - [`AutoContinuePolicy`] - Always returns `ErrorDecision::ContinueAll`
//! - [`AutoStopPolicy`] - Always returns `ErrorDecision::Stop`

use async_trait::async_trait;
use parcel_domain::{ErrorDecision, ParcelId};
use thiserror::Error;

/// Failure while obtaining a decision, as opposed to the decision itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorPolicyError {
    /// The user aborted the prompt (e.g. EOF on stdin)
    #[error("Operation cancelled")]
    Cancelled,

    /// Terminal read failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Decides how a run reacts to a recoverable per-parcel error.
///
/// Called at most once per failing parcel, and not at all after a
/// `ContinueAll` answer.
#[async_trait]
pub trait ErrorPolicyPort: Send + Sync {
    async fn decide(
        &self,
        id: &ParcelId,
        message: &str,
    ) -> Result<ErrorDecision, ErrorPolicyError>;
}

/// Skips every failing parcel without asking.
///
/// Used for `--yes` and other non-interactive runs.
pub struct AutoContinuePolicy;

#[async_trait]
impl ErrorPolicyPort for AutoContinuePolicy {
    async fn decide(
        &self,
        _id: &ParcelId,
        _message: &str,
    ) -> Result<ErrorDecision, ErrorPolicyError> {
        Ok(ErrorDecision::ContinueAll)
    }
}

/// Stops on the first failing parcel.
pub struct AutoStopPolicy;

#[async_trait]
impl ErrorPolicyPort for AutoStopPolicy {
    async fn decide(
        &self,
        _id: &ParcelId,
        _message: &str,
    ) -> Result<ErrorDecision, ErrorPolicyError> {
        Ok(ErrorDecision::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_continue_policy() {
        let id = ParcelId::new("020301_1.0001.1/1").unwrap();
        let decision = AutoContinuePolicy.decide(&id, "not found").await.unwrap();
        assert_eq!(decision, ErrorDecision::ContinueAll);
    }

    #[tokio::test]
    async fn test_auto_stop_policy() {
        let id = ParcelId::new("020301_1.0001.1/1").unwrap();
        let decision = AutoStopPolicy.decide(&id, "not found").await.unwrap();
        assert_eq!(decision, ErrorDecision::Stop);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ErrorPolicyError::Cancelled.to_string(), "Operation cancelled");
        assert_eq!(
            ErrorPolicyError::Io("broken pipe".to_string()).to_string(),
            "I/O error: broken pipe"
        );
    }
}
