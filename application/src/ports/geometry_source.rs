//! Geometry source port
//!
//! Defines the interface for retrieving parcel boundaries from a
//! cadastral service.

use async_trait::async_trait;
use parcel_domain::{ParcelId, Polygon};
use thiserror::Error;

/// Errors that can occur while fetching one parcel's geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The service knows nothing about this identifier
    #[error("Identifier {identifier} does not exist: {message}")]
    NotFound { identifier: String, message: String },

    /// The service answered, but the payload was unusable
    #[error("Bad response for identifier {identifier}: {message}")]
    ServerResponse { identifier: String, message: String },

    /// The service could not be reached at all
    #[error("Connection error: {0}")]
    Connection(String),
}

impl FetchError {
    pub fn not_found(id: &ParcelId, message: impl Into<String>) -> Self {
        FetchError::NotFound {
            identifier: id.to_string(),
            message: message.into(),
        }
    }

    pub fn server_response(id: &ParcelId, message: impl Into<String>) -> Self {
        FetchError::ServerResponse {
            identifier: id.to_string(),
            message: message.into(),
        }
    }

    /// Connection failures mean the whole service is unreachable, so
    /// continuing with other identifiers is pointless.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Connection(_))
    }
}

/// Source of parcel geometries
///
/// This port defines how the application layer obtains parcel boundaries.
/// Implementations (adapters) live in the infrastructure layer. Each call
/// must be independent; the use case runs several concurrently.
#[async_trait]
pub trait GeometrySource: Send + Sync {
    /// Fetch and decode the boundary of one parcel
    async fn fetch(&self, id: &ParcelId) -> Result<Polygon, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_fatal() {
        let id = ParcelId::new("020301_1.0001.1/1").unwrap();
        assert!(!FetchError::not_found(&id, "missing").is_fatal());
        assert!(!FetchError::server_response(&id, "bad hex").is_fatal());
        assert!(FetchError::Connection("refused".to_string()).is_fatal());
    }

    #[test]
    fn test_error_messages_name_the_identifier() {
        let id = ParcelId::new("020301_1.0001.1/1").unwrap();
        let message = FetchError::not_found(&id, "brak wyników").to_string();
        assert!(message.contains("020301_1.0001.1/1"));
        assert!(message.contains("brak wyników"));
    }
}
