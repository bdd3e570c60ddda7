//! Command line flags merged over file configuration

use parcel_application::{FetchParams, RunOptions};
use parcel_infrastructure::FileConfig;
use parcel_presentation::{Cli, OutputConfig};
use std::path::PathBuf;

/// Drawing written when neither `-o` nor `[output] path` is given
pub const DEFAULT_OUTPUT: &str = "parcels.dxf";

/// Everything a run needs once flags and config files are combined
#[derive(Debug, Clone)]
pub struct Settings {
    pub options: RunOptions,
    pub params: FetchParams,
    pub failure_log: PathBuf,
    pub output: OutputConfig,
}

impl Settings {
    /// Flags take priority; unset flags fall back to the file value.
    ///
    /// Config issues are not reported here, see `FileConfig::validate`.
    pub fn resolve(cli: &Cli, config: &FileConfig) -> Self {
        let drawing = &config.drawing;

        let output_path = cli
            .output
            .clone()
            .or_else(|| config.output.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        let mut options = RunOptions::new(output_path)
            .with_draw_mode(cli.draw_mode().unwrap_or_else(|| drawing.parse_mode().0))
            .with_outline_color(cli.color.unwrap_or_else(|| drawing.parse_color().0))
            .with_reproject(cli.reproject || drawing.reproject);

        if cli.label || drawing.label {
            let color = cli
                .label_color
                .unwrap_or_else(|| drawing.parse_label_color().0);
            options = options.with_identifier(color);
        }
        if let Some(height) = cli.text_height.or(drawing.text_height) {
            options = options.with_text_height(height);
        }

        let mut params = config.service.to_fetch_params().0;
        if let Some(concurrency) = cli.concurrency {
            params = params.with_concurrency(concurrency);
        }

        let failure_log = cli
            .failure_log
            .clone()
            .unwrap_or_else(|| config.output.failure_log.clone());

        let output = OutputConfig::resolve(
            config.output.format,
            config.output.color,
            cli.format.map(Into::into),
            cli.quiet,
        );

        Self {
            options,
            params,
            failure_log,
            output,
        }
    }
}
