//! CLI command definitions

use clap::{Parser, ValueEnum};
use parcel_domain::{AciColor, DrawMode};
use std::path::PathBuf;

/// Report format printed after the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// JSON run report
    Json,
}

impl From<OutputFormat> for parcel_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => parcel_domain::OutputFormat::Text,
            OutputFormat::Json => parcel_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for parcel-drawer
#[derive(Parser, Debug)]
#[command(name = "parcel-drawer")]
#[command(author, version, about = "Draw cadastral parcels from ULDK into a DXF file")]
#[command(long_about = r#"
parcel-drawer fetches parcel boundaries from the ULDK service (GUGiK) and
draws them into a DXF file.

All parcels in one run must lie in the same PUWG 2000 zone. The first parcel
that is found decides the zone; a parcel from another zone stops the run and
nothing is saved. Parcels that cannot be fetched are written to a failure log
so they can be retried with --input-file.

Configuration files are loaded from (in priority order):
1. --config <path>                              Explicit config file
2. ./parcel-drawer.toml or ./.parcel-drawer.toml  Project-level config
3. ~/.config/parcel-drawer/config.toml          Global config

Example:
  parcel-drawer 020301_1.0001.1/1 -o plot.dxf
  parcel-drawer -i 101511_1.0016.164/1,101511_1.0016.165 --lines --color green
  parcel-drawer --input-file ids.txt --label --reproject -o zone7.dxf
"#)]
pub struct Cli {
    /// Parcel identifiers (comma separated, may be repeated)
    #[arg(value_name = "ID")]
    pub identifiers: Vec<String>,

    /// More parcel identifiers (comma separated, may be repeated)
    #[arg(short = 'i', long = "id", value_name = "IDS")]
    pub ids: Vec<String>,

    /// File with identifiers separated by commas or newlines
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Output DXF file (loaded and extended if it exists)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Draw each edge as a separate line instead of a closed polyline
    #[arg(long)]
    pub lines: bool,

    /// Outline color (red, yellow, green, blue, black, white or an ACI index)
    #[arg(long, value_name = "COLOR")]
    pub color: Option<AciColor>,

    /// Add the parcel number as a text label at the centroid
    #[arg(long)]
    pub label: bool,

    /// Label color
    #[arg(long, value_name = "COLOR")]
    pub label_color: Option<AciColor>,

    /// Label height in drawing units (default 10 with --reproject, else 2.5)
    #[arg(long, value_name = "HEIGHT")]
    pub text_height: Option<f64>,

    /// Reproject from PUWG 1992 into the parcels' PUWG 2000 zone
    #[arg(long)]
    pub reproject: bool,

    /// Number of parallel requests to the service
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Where to write identifiers that could not be drawn
    #[arg(long, value_name = "PATH")]
    pub failure_log: Option<PathBuf>,

    /// Skip failing parcels without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Draw mode requested on the command line, if any
    pub fn draw_mode(&self) -> Option<DrawMode> {
        self.lines.then_some(DrawMode::Lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers_and_flags() {
        let cli = Cli::try_parse_from([
            "parcel-drawer",
            "020301_1.0001.1/1",
            "-i",
            "020301_1.0001.2,020301_1.0001.3",
            "--lines",
            "--color",
            "green",
            "--label",
            "--text-height",
            "4",
            "-o",
            "out.dxf",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.identifiers, vec!["020301_1.0001.1/1"]);
        assert_eq!(cli.ids, vec!["020301_1.0001.2,020301_1.0001.3"]);
        assert_eq!(cli.draw_mode(), Some(DrawMode::Lines));
        assert_eq!(cli.color, Some(AciColor::GREEN));
        assert!(cli.label);
        assert_eq!(cli.text_height, Some(4.0));
        assert_eq!(cli.output, Some(PathBuf::from("out.dxf")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_color_accepts_index() {
        let cli = Cli::try_parse_from(["parcel-drawer", "--label-color", "5"]).unwrap();
        assert_eq!(cli.label_color, Some(AciColor::BLUE));
        assert_eq!(cli.draw_mode(), None);
    }

    #[test]
    fn test_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["parcel-drawer", "--color", "mauve"]).is_err());
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["parcel-drawer", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
