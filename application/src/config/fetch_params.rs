//! Fetch parameters - pipeline concurrency control.
//!
//! [`FetchParams`] groups the static parameters that control how
//! [`DrawParcelsUseCase`](crate::use_cases::draw_parcels::DrawParcelsUseCase)
//! fans work out to the geometry source. These are application-layer
//! concerns, not domain policy.

use parcel_domain::Crs;
use serde::{Deserialize, Serialize};

/// Default number of fetches in flight
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Pipeline fetch parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchParams {
    /// Maximum number of geometry fetches running at once.
    pub concurrency: usize,
    /// System the geometry source returns coordinates in.
    pub source_crs: Crs,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            source_crs: Crs::Puwg1992,
        }
    }
}

impl FetchParams {
    // ==================== Builder Methods ====================

    /// Set the concurrency limit; values below 1 are raised to 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_source_crs(mut self, crs: Crs) -> Self {
        self.source_crs = crs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FetchParams::default();
        assert_eq!(params.concurrency, 5);
        assert_eq!(params.source_crs, Crs::Puwg1992);
    }

    #[test]
    fn test_concurrency_floor() {
        assert_eq!(FetchParams::default().with_concurrency(0).concurrency, 1);
        assert_eq!(FetchParams::default().with_concurrency(8).concurrency, 8);
    }
}
