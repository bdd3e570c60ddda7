//! Progress reporting for drawing runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parcel_application::{ProgressNotifier, RunReport};
use parcel_domain::{ParcelId, RunState, Zone};
use std::sync::Mutex;

/// Reports progress with an indicatif bar running from 0 to 100 %
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn current(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|bar| bar.clone())
    }

    /// Run `f` with the bar hidden, so prompts and messages are not
    /// overdrawn.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match self.current() {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total: usize) {
        let bar = ProgressBar::new(100);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Drawing");
        bar.set_message(format!("{total} parcels"));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn on_progress(&self, percent: f64) {
        if let Some(bar) = self.current() {
            bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
        }
    }

    fn on_parcel_failed(&self, id: &ParcelId, message: &str) {
        let line = format!("  {} {}: {}", "x".red(), id, message.dimmed());
        match self.current() {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    fn on_zone_anchored(&self, zone: Zone) {
        if let Some(bar) = self.current() {
            bar.set_message(zone.to_string().yellow().to_string());
        }
    }

    fn on_run_finished(&self, report: &RunReport) {
        let Some(bar) = self.bar.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        match report.state {
            RunState::Completed => {
                bar.finish_with_message("done".green().to_string());
            }
            RunState::Cancelled => bar.abandon_with_message("cancelled".yellow().to_string()),
            _ => bar.abandon_with_message("failed".red().to_string()),
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total: usize) {
        eprintln!("{} Drawing {} parcels", "->".cyan(), total);
    }

    fn on_progress(&self, percent: f64) {
        eprintln!("  {} {:.0}%", "v".green(), percent);
    }

    fn on_parcel_failed(&self, id: &ParcelId, message: &str) {
        eprintln!("  {} {} ({})", "x".red(), id, message);
    }

    fn on_zone_anchored(&self, zone: Zone) {
        eprintln!("  {} batch is in {}", "*".yellow(), zone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_without_bar_runs_closure() {
        let reporter = ProgressReporter::new();
        assert_eq!(reporter.suspend(|| 42), 42);
    }

    #[test]
    fn test_bar_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_run_start(4);
        reporter.on_progress(50.0);
        assert_eq!(reporter.current().map(|b| b.position()), Some(50));

        reporter.on_progress(100.0);
        assert_eq!(reporter.current().map(|b| b.position()), Some(100));
    }
}
