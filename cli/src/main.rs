//! CLI entrypoint for parcel-drawer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod settings;

use anyhow::{Context, Result, bail};
use clap::Parser;
use parcel_application::{
    AutoContinuePolicy, DrawParcelsError, DrawParcelsInput, DrawParcelsUseCase, ErrorPolicyPort,
    NoProgress, ProgressNotifier, RunReport,
};
use parcel_domain::{OutputFormat, RunState};
use parcel_infrastructure::{ConfigLoader, DxfDrawingStore, FileFailureLog, UldkGeometrySource};
use parcel_presentation::{
    Cli, ConsoleFormatter, InteractiveErrorPolicy, ProgressReporter, collect_identifiers,
};
use settings::Settings;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting parcel-drawer");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|issue| !issue.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|issue| issue.is_error())
        .map(|issue| issue.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    let settings = Settings::resolve(&cli, &config);
    settings.output.apply_color();

    // === Input ===
    let identifiers = collect_identifiers(&cli.identifiers, &cli.ids, cli.input_file.as_deref())?;
    if identifiers.is_empty() {
        bail!("No parcel identifiers given. Pass them as arguments, with -i or --input-file.");
    }
    check_output_dir(&settings.options.output_path)?;

    // === Dependency Injection ===
    let source = Arc::new(
        UldkGeometrySource::from_config(&config.service)
            .context("Failed to build the HTTP client")?,
    );
    let store = Arc::new(DxfDrawingStore::new());
    let failure_log = Arc::new(FileFailureLog::new(&settings.failure_log));

    let reporter = settings
        .output
        .show_progress
        .then(|| Arc::new(ProgressReporter::new()));

    let policy: Arc<dyn ErrorPolicyPort> = if cli.yes {
        Arc::new(AutoContinuePolicy)
    } else {
        let mut interactive = InteractiveErrorPolicy::new();
        if let Some(reporter) = &reporter {
            interactive = interactive.with_reporter(Arc::clone(reporter));
        }
        Arc::new(interactive)
    };

    let token = CancellationToken::new();
    spawn_ctrl_c_handler(token.clone());

    let use_case = DrawParcelsUseCase::new(source, store)
        .with_params(settings.params.clone())
        .with_error_policy(policy)
        .with_failure_log(failure_log)
        .with_cancellation(token);

    info!(
        "Drawing {} parcels into {}",
        identifiers.len(),
        settings.options.output_path.display()
    );

    let input = DrawParcelsInput::new(identifiers, settings.options.clone());
    let progress: &dyn ProgressNotifier = match &reporter {
        Some(reporter) => reporter.as_ref(),
        None => &NoProgress,
    };

    match use_case.execute_with_progress(input, progress).await {
        Ok(report) => {
            print_report(&report, settings.output.format);
            Ok(exit_code(&report))
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
            Ok(error_exit_code(&e))
        }
    }
}

/// Set up tracing: stderr always, plus a plain-text file when requested.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn check_output_dir(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        bail!("Output directory does not exist: {}", parent.display());
    }
    Ok(())
}

fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing the current parcel");
            token.cancel();
        }
    });
}

fn print_report(report: &RunReport, format: OutputFormat) {
    let output = match format {
        OutputFormat::Text => ConsoleFormatter::format(report),
        OutputFormat::Json => ConsoleFormatter::format_json(report),
    };
    println!("{output}");
}

fn exit_code(report: &RunReport) -> ExitCode {
    match report.state {
        RunState::Completed => ExitCode::SUCCESS,
        RunState::Cancelled => ExitCode::from(130),
        _ => ExitCode::FAILURE,
    }
}

fn error_exit_code(error: &DrawParcelsError) -> ExitCode {
    if error.is_input_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
