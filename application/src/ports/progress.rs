//! Progress notification port
//!
//! Defines the interface for reporting progress while parcels are drawn.

use crate::use_cases::draw_parcels::RunReport;
use parcel_domain::{ParcelId, Zone};

/// Callback for progress updates during a drawing run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once the document is open and fetching begins
    fn on_run_start(&self, _total: usize) {}

    /// Called after each rendered parcel with `consumed / total * 100`
    fn on_progress(&self, percent: f64);

    /// Called once for every parcel that could not be drawn
    fn on_parcel_failed(&self, _id: &ParcelId, _message: &str) {}

    /// Called when the first classified parcel fixes the batch zone
    fn on_zone_anchored(&self, _zone: Zone) {}

    /// Called when the run reaches a terminal state
    fn on_run_finished(&self, _report: &RunReport) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_progress(&self, _percent: f64) {}
}
