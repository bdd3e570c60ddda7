//! Console output formatter for run reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use parcel_application::RunReport;
use parcel_domain::RunState;

/// Formats run reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the summary of a finished run
    pub fn format(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Parcel Drawer"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::state_label(report.state)
        ));
        output.push_str(&format!(
            "{} {} of {} parcels\n",
            "Drawn:".cyan().bold(),
            report.rendered,
            report.total
        ));

        if let Some(zone) = report.zone {
            output.push_str(&format!("{} {}\n", "Zone:".cyan().bold(), zone));
        }
        if let Some(crs) = report.output_crs {
            output.push_str(&format!("{} {}\n", "CRS:".cyan().bold(), crs));
        }

        if report.saved {
            output.push_str(&format!(
                "{} {}\n",
                "Saved to:".cyan().bold(),
                report.output_path.display()
            ));
        } else {
            output.push_str(&format!(
                "{} {}\n",
                "Not saved:".yellow().bold(),
                report.output_path.display()
            ));
        }

        if !report.failed.is_empty() {
            output.push_str(&Self::section_header(&format!(
                "Failed ({})",
                report.failed.len()
            )));
            for id in &report.failed {
                output.push_str(&format!("  {} {}\n", "x".red(), id));
            }
            if let Some(path) = &report.failure_log {
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Failure log:".dimmed(),
                    path.display()
                ));
            }
        }

        if let Some(error) = &report.error {
            output.push_str(&format!("\n{} {}\n", "Error:".red().bold(), error));
        }

        output.push_str(&format!(
            "\n{}\n",
            format!("Finished in {} ms", report.duration_ms()).dimmed()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &RunReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// One-line error for failures that happen before a run starts
    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn state_label(state: RunState) -> String {
        match state {
            RunState::Completed => state.to_string().green().bold().to_string(),
            RunState::Cancelled => state.to_string().yellow().bold().to_string(),
            RunState::Failed => state.to_string().red().bold().to_string(),
            _ => state.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &RunReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &RunReport) -> String {
        Self::format_json(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parcel_domain::{Crs, ParcelId, Zone};
    use std::path::PathBuf;

    fn report(state: RunState) -> RunReport {
        let now = Utc::now();
        RunReport {
            state,
            total: 3,
            rendered: 2,
            failed: vec![ParcelId::new("020301_1.0001.2").unwrap()],
            zone: Some(Zone::Zone6),
            output_crs: Some(Crs::Puwg1992),
            output_path: PathBuf::from("parcels.dxf"),
            saved: state == RunState::Completed,
            failure_log: Some(PathBuf::from("failed_identifiers.txt")),
            error: None,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_text_summary() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&report(RunState::Completed));

        assert!(text.contains("Status: completed"));
        assert!(text.contains("Drawn: 2 of 3 parcels"));
        assert!(text.contains("Saved to: parcels.dxf"));
        assert!(text.contains("020301_1.0001.2"));
        assert!(text.contains("failed_identifiers.txt"));
    }

    #[test]
    fn test_text_summary_for_cancelled_run() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&report(RunState::Cancelled));
        assert!(text.contains("Not saved: parcels.dxf"));
    }

    #[test]
    fn test_json_report() {
        let json = ConsoleFormatter::format_json(&report(RunState::Completed));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rendered"], 2);
        assert_eq!(value["failed"][0], "020301_1.0001.2");
        assert_eq!(value["saved"], true);
    }
}
