//! Draw Parcels use case
//!
//! Fetches parcel boundaries concurrently, enforces that the whole batch
//! lies in one PUWG 2000 zone, optionally reprojects, and renders every
//! parcel into a single drawing.
//!
//! ```text
//! identifiers ──► spawn fetch (≤ concurrency in flight)
//!                      │  results consumed in input order
//!                      ▼
//!               classify zone ──► first success anchors the batch zone
//!                      │           later mismatch or unknown prefix
//!                      │           → WrongZone / ZoneUnknown (no save)
//!                      ▼
//!               reproject? ──► render outline (+ label) ──► progress
//!                      │
//!                      ▼
//!               save drawing, then failure log if anything failed
//! ```
//!
//! Per-parcel errors (not found, bad payload, no drawable outline, unknown
//! zone before anything is anchored) go through the [`ErrorPolicyPort`]. A
//! connection error or a zone mismatch fails the run.
//! Cancellation and a `Stop` decision end the run without saving.

mod types;

pub use types::{
    DEFAULT_TEXT_HEIGHT, DEFAULT_TEXT_HEIGHT_REPROJECTED, DrawParcelsError, DrawParcelsInput,
    RunOptions, RunReport,
};

use types::ParcelOutcome;

use crate::config::FetchParams;
use crate::ports::drawing::{DrawingDocument, DrawingStore};
use crate::ports::error_policy::{AutoContinuePolicy, ErrorPolicyPort};
use crate::ports::failure_log::FailureLogPort;
use crate::ports::geometry_source::{FetchError, GeometrySource};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream;
use parcel_domain::{
    Crs, DrawMode, ErrorDecision, IDENTIFIER_LAYER, ParcelId, Polygon, Reprojector, RingExt,
    RunState, Zone, ZoneTable,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for drawing a batch of parcels into one document
pub struct DrawParcelsUseCase<S: GeometrySource + 'static, D: DrawingStore + 'static> {
    source: Arc<S>,
    store: Arc<D>,
    zone_table: Arc<ZoneTable>,
    params: FetchParams,
    error_policy: Arc<dyn ErrorPolicyPort>,
    failure_log: Option<Arc<dyn FailureLogPort>>,
    cancellation_token: Option<CancellationToken>,
}

impl<S, D> Clone for DrawParcelsUseCase<S, D>
where
    S: GeometrySource + 'static,
    D: DrawingStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            store: self.store.clone(),
            zone_table: self.zone_table.clone(),
            params: self.params.clone(),
            error_policy: self.error_policy.clone(),
            failure_log: self.failure_log.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<S: GeometrySource + 'static, D: DrawingStore + 'static> DrawParcelsUseCase<S, D> {
    pub fn new(source: Arc<S>, store: Arc<D>) -> Self {
        Self {
            source,
            store,
            zone_table: Arc::new(ZoneTable::standard()),
            params: FetchParams::default(),
            error_policy: Arc::new(AutoContinuePolicy),
            failure_log: None,
            cancellation_token: None,
        }
    }

    pub fn with_error_policy(mut self, policy: Arc<dyn ErrorPolicyPort>) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_failure_log(mut self, log: Arc<dyn FailureLogPort>) -> Self {
        self.failure_log = Some(log);
        self
    }

    pub fn with_zone_table(mut self, table: ZoneTable) -> Self {
        self.zone_table = Arc::new(table);
        self
    }

    pub fn with_params(mut self, params: FetchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: DrawParcelsInput) -> Result<RunReport, DrawParcelsError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Returns a report for `Completed` and `Cancelled` runs. A `Failed` run
    /// returns the error, after `on_run_finished` has seen its report.
    pub async fn execute_with_progress(
        &self,
        input: DrawParcelsInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RunReport, DrawParcelsError> {
        let DrawParcelsInput {
            identifiers,
            options,
        } = input;

        if identifiers.is_empty() {
            return Err(DrawParcelsError::NoIdentifiers);
        }
        options.validate()?;

        let mut document = self.store.open_or_create(&options.output_path);
        let mut run = RunContext::new(identifiers.len());
        run.transition(RunState::Running);

        info!(
            "Drawing {} parcels into {} ({} mode, concurrency {})",
            run.total,
            options.output_path.display(),
            options.draw_mode,
            self.params.concurrency
        );
        progress.on_run_start(run.total);

        document.ensure_layer(options.draw_mode.layer_name(), options.outline_color);
        if options.add_identifier {
            document.ensure_layer(IDENTIFIER_LAYER, options.identifier_color);
        }

        let source = Arc::clone(&self.source);
        let results = stream::iter(identifiers)
            .map(move |id| {
                let source = Arc::clone(&source);
                let task_id = id.clone();
                let handle = tokio::spawn(async move { source.fetch(&task_id).await });
                async move {
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(e) => Err(FetchError::server_response(
                            &id,
                            format!("fetch task failed: {e}"),
                        )),
                    };
                    (id, result)
                }
            })
            .buffered(self.params.concurrency.max(1));
        let mut results = std::pin::pin!(results);

        while let Some((id, result)) = results.next().await {
            if self.is_cancelled() {
                info!("Run cancelled after {} of {} parcels", run.consumed, run.total);
                run.transition(RunState::Cancelled);
                break;
            }
            run.consumed += 1;

            let outcome = match result {
                Err(e) if e.is_fatal() => {
                    let error = DrawParcelsError::Connection(e.to_string());
                    return Err(self.fail(run, &options, error, progress));
                }
                Err(e) => {
                    self.handle_failure(&mut run, &id, &e.to_string(), progress)
                        .await
                }
                Ok(polygon) => match (self.zone_table.classify(&id), run.zone) {
                    (None, Some(expected)) => {
                        let error = DrawParcelsError::ZoneUnknown {
                            identifier: id.clone(),
                            expected,
                        };
                        return Err(self.fail(run, &options, error, progress));
                    }
                    (None, None) => {
                        let message = format!(
                            "prefix {} does not belong to any known zone",
                            id.zone_prefix().unwrap_or(id.as_str())
                        );
                        self.handle_failure(&mut run, &id, &message, progress)
                            .await
                    }
                    (Some(zone), _) => {
                        if let Err(e) = self.check_zone(&mut run, &id, zone, &options, progress) {
                            return Err(self.fail(run, &options, e, progress));
                        }
                        if render_parcel(document.as_mut(), &id, &polygon, &run, &options) > 0 {
                            ParcelOutcome::Rendered
                        } else {
                            let message = "geometry has no drawable outline";
                            self.handle_failure(&mut run, &id, message, progress)
                                .await
                        }
                    }
                },
            };

            match outcome {
                ParcelOutcome::Rendered => {
                    run.rendered += 1;
                    progress.on_progress(run.percent());
                }
                ParcelOutcome::Skipped => {}
                ParcelOutcome::Stop => {
                    info!("Run stopped at {}", id);
                    run.transition(RunState::Cancelled);
                    break;
                }
            }
        }

        if run.state == RunState::Cancelled {
            let report = run.into_report(&options, false, None, None);
            progress.on_run_finished(&report);
            return Ok(report);
        }

        if let Err(e) = document.save(&options.output_path) {
            return Err(self.fail(run, &options, e.into(), progress));
        }
        info!(
            "Saved {} parcels to {}",
            run.rendered,
            options.output_path.display()
        );

        let failure_log = self.write_failure_log(&run.failed);

        run.transition(RunState::Completed);
        let report = run.into_report(&options, true, failure_log, None);
        progress.on_run_finished(&report);
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }

    /// Anchor the batch zone on the first classified parcel, or verify
    /// that later parcels match it.
    fn check_zone(
        &self,
        run: &mut RunContext,
        id: &ParcelId,
        zone: Zone,
        options: &RunOptions,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), DrawParcelsError> {
        match run.zone {
            Some(expected) if expected != zone => Err(DrawParcelsError::WrongZone {
                identifier: id.clone(),
                expected,
                found: zone,
            }),
            Some(_) => Ok(()),
            None => {
                info!("Batch anchored to {} by {}", zone, id);
                run.zone = Some(zone);
                if options.reproject {
                    run.reprojector = Some(Reprojector::new(self.params.source_crs, zone.crs()));
                    run.output_crs = Some(zone.crs());
                } else {
                    run.output_crs = Some(self.params.source_crs);
                }
                progress.on_zone_anchored(zone);
                Ok(())
            }
        }
    }

    async fn handle_failure(
        &self,
        run: &mut RunContext,
        id: &ParcelId,
        message: &str,
        progress: &dyn ProgressNotifier,
    ) -> ParcelOutcome {
        warn!("Parcel {} failed: {}", id, message);
        run.failed.push(id.clone());
        progress.on_parcel_failed(id, message);

        if run.continue_all {
            return ParcelOutcome::Skipped;
        }

        match self.error_policy.decide(id, message).await {
            Ok(ErrorDecision::Continue) => ParcelOutcome::Skipped,
            Ok(ErrorDecision::ContinueAll) => {
                debug!("Skipping all further failures without asking");
                run.continue_all = true;
                ParcelOutcome::Skipped
            }
            Ok(ErrorDecision::Stop) => ParcelOutcome::Stop,
            Err(e) => {
                warn!("Error policy failed ({}), stopping", e);
                ParcelOutcome::Stop
            }
        }
    }

    fn write_failure_log(&self, failed: &[ParcelId]) -> Option<std::path::PathBuf> {
        if failed.is_empty() {
            return None;
        }
        let log = self.failure_log.as_ref()?;
        match log.write(failed) {
            Ok(path) => {
                info!(
                    "Wrote {} failed identifiers to {}",
                    failed.len(),
                    path.display()
                );
                Some(path)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    fn fail(
        &self,
        mut run: RunContext,
        options: &RunOptions,
        error: DrawParcelsError,
        progress: &dyn ProgressNotifier,
    ) -> DrawParcelsError {
        warn!("Run failed: {}", error);
        run.transition(RunState::Failed);
        let report = run.into_report(options, false, None, Some(error.to_string()));
        progress.on_run_finished(&report);
        error
    }
}

/// Draw one parcel's rings and optional label, returning the number of
/// outline entities added. Nothing is labelled when that number is 0.
fn render_parcel(
    document: &mut dyn DrawingDocument,
    id: &ParcelId,
    polygon: &Polygon,
    run: &RunContext,
    options: &RunOptions,
) -> usize {
    let reprojected;
    let polygon = match &run.reprojector {
        Some(reprojector) => {
            reprojected = reprojector.transform(polygon);
            &reprojected
        }
        None => polygon,
    };

    let layer = options.draw_mode.layer_name();
    let mut outlines = 0;
    for ring in polygon.rings() {
        outlines += match options.draw_mode {
            DrawMode::Polygon => {
                document.add_polygon(ring.open_points(), layer, options.outline_color)
            }
            DrawMode::Lines => document.add_line_segments(&ring.0, layer, options.outline_color),
        };
    }
    if outlines == 0 {
        warn!("Parcel {} has no drawable outline", id);
        return 0;
    }

    if options.add_identifier {
        match polygon.centroid() {
            Some(position) => document.add_text(
                id.short_label(),
                position,
                options.text_height(),
                IDENTIFIER_LAYER,
                options.identifier_color,
            ),
            None => warn!("Parcel {} has no area to label", id),
        }
    }
    debug!("Rendered {} ({} vertices)", id, polygon.vertex_count());
    outlines
}

/// Mutable bookkeeping for one run
struct RunContext {
    state: RunState,
    total: usize,
    consumed: usize,
    rendered: usize,
    failed: Vec<ParcelId>,
    zone: Option<Zone>,
    output_crs: Option<Crs>,
    reprojector: Option<Reprojector>,
    continue_all: bool,
    started_at: DateTime<Utc>,
}

impl RunContext {
    fn new(total: usize) -> Self {
        Self {
            state: RunState::Idle,
            total,
            consumed: 0,
            rendered: 0,
            failed: Vec::new(),
            zone: None,
            output_crs: None,
            reprojector: None,
            continue_all: false,
            started_at: Utc::now(),
        }
    }

    fn transition(&mut self, next: RunState) {
        if !self.state.can_transition_to(next) {
            warn!("Unexpected run transition {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn percent(&self) -> f64 {
        self.consumed as f64 / self.total as f64 * 100.0
    }

    fn into_report(
        self,
        options: &RunOptions,
        saved: bool,
        failure_log: Option<std::path::PathBuf>,
        error: Option<String>,
    ) -> RunReport {
        RunReport {
            state: self.state,
            total: self.total,
            rendered: self.rendered,
            failed: self.failed,
            zone: self.zone,
            output_crs: self.output_crs,
            output_path: options.output_path.clone(),
            saved,
            failure_log,
            error,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}
