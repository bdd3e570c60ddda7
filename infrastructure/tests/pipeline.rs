//! End-to-end runs of the drawing use case against the real DXF writer.

use async_trait::async_trait;
use dxf::Drawing;
use dxf::entities::EntityType;
use parcel_application::{
    DrawParcelsError, DrawParcelsInput, DrawParcelsUseCase, DrawingDocument, FetchError,
    GeometrySource, ProgressNotifier, RunOptions,
};
use parcel_domain::{
    AciColor, DrawMode, IDENTIFIER_LAYER, LINES_LAYER, POLYGON_LAYER, ParcelId, Point, Polygon,
    RingExt, RunState,
};
use parcel_infrastructure::{DxfDocument, DxfDrawingStore, FileFailureLog};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

struct FakeSource {
    parcels: HashMap<String, Polygon>,
}

impl FakeSource {
    fn new(entries: &[(&str, Polygon)]) -> Self {
        Self {
            parcels: entries
                .iter()
                .map(|(id, polygon)| (id.to_string(), polygon.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl GeometrySource for FakeSource {
    async fn fetch(&self, id: &ParcelId) -> Result<Polygon, FetchError> {
        self.parcels
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| FetchError::not_found(id, "brak wyników"))
    }
}

struct CancelAfter {
    count: usize,
    token: CancellationToken,
    seen: Mutex<usize>,
}

impl ProgressNotifier for CancelAfter {
    fn on_progress(&self, _percent: f64) {
        let mut seen = self.seen.lock().unwrap();
        *seen += 1;
        if *seen >= self.count {
            self.token.cancel();
        }
    }
}

fn square(x: f64, y: f64) -> Polygon {
    Polygon::from_exterior(vec![
        Point { x, y },
        Point { x: x + 10.0, y },
        Point { x: x + 10.0, y: y + 10.0 },
        Point { x, y: y + 10.0 },
        Point { x, y },
    ])
}

fn ids(values: &[&str]) -> Vec<ParcelId> {
    values.iter().map(|v| ParcelId::new(*v).unwrap()).collect()
}

fn use_case(source: FakeSource) -> DrawParcelsUseCase<FakeSource, DxfDrawingStore> {
    DrawParcelsUseCase::new(Arc::new(source), Arc::new(DxfDrawingStore::new()))
}

/// Write a drawing with one polyline so later runs have something to preserve
fn seed(path: &Path) -> Vec<u8> {
    let mut doc = DxfDocument::new();
    doc.add_polygon(
        square(0.0, 0.0).exterior().open_points(),
        POLYGON_LAYER,
        AciColor::WHITE,
    );
    doc.save(path).unwrap();
    std::fs::read(path).unwrap()
}

#[tokio::test]
async fn single_parcel_is_saved_as_closed_polyline() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("parcels.dxf");
    let failure_log = dir.path().join("failed_identifiers.txt");
    let source = FakeSource::new(&[("020301_1.0001.1/1", square(1000.0, 2000.0))]);

    let report = use_case(source)
        .with_failure_log(Arc::new(FileFailureLog::new(&failure_log)))
        .execute(DrawParcelsInput::new(
            ids(&["020301_1.0001.1/1"]),
            RunOptions::new(&output),
        ))
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Completed);
    assert!(!failure_log.exists());

    let drawing = Drawing::load_file(&output).unwrap();
    let entities: Vec<_> = drawing.entities().collect();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].common.layer, POLYGON_LAYER);
    match &entities[0].specific {
        EntityType::LwPolyline(polyline) => {
            assert!(polyline.is_closed());
            assert_eq!(polyline.vertices.len(), 4);
            assert!((polyline.vertices[2].x - 1010.0).abs() < 1e-9);
            assert!((polyline.vertices[2].y - 2010.0).abs() < 1e-9);
        }
        other => panic!("expected LWPOLYLINE, got {other:?}"),
    }
}

#[tokio::test]
async fn lines_and_labels_with_failure_log() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("parcels.dxf");
    let failure_log = dir.path().join("failed_identifiers.txt");
    let source = FakeSource::new(&[
        ("020301_1.0001.1/1", square(0.0, 0.0)),
        ("020301_1.0001.3", square(20.0, 0.0)),
    ]);
    let options = RunOptions::new(&output)
        .with_draw_mode(DrawMode::Lines)
        .with_outline_color(AciColor::YELLOW)
        .with_identifier(AciColor::RED);

    let report = use_case(source)
        .with_failure_log(Arc::new(FileFailureLog::new(&failure_log)))
        .execute(DrawParcelsInput::new(
            ids(&["020301_1.0001.1/1", "020301_1.0001.2", "020301_1.0001.3"]),
            options,
        ))
        .await
        .unwrap();

    assert_eq!(report.rendered, 2);
    assert_eq!(report.failure_log.as_deref(), Some(failure_log.as_path()));
    assert_eq!(
        std::fs::read_to_string(&failure_log).unwrap(),
        "020301_1.0001.2"
    );

    let drawing = Drawing::load_file(&output).unwrap();
    let lines = drawing
        .entities()
        .filter(|e| matches!(e.specific, EntityType::Line(_)))
        .count();
    assert_eq!(lines, 8);
    assert!(
        drawing
            .entities()
            .filter(|e| matches!(e.specific, EntityType::Line(_)))
            .all(|e| e.common.layer == LINES_LAYER)
    );

    let labels: Vec<String> = drawing
        .entities()
        .filter_map(|e| match &e.specific {
            EntityType::Text(text) if e.common.layer == IDENTIFIER_LAYER => {
                Some(text.value.clone())
            }
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["1/1".to_string(), "3".to_string()]);
    assert!(drawing.layers().any(|l| l.name == IDENTIFIER_LAYER));
}

#[tokio::test]
async fn wrong_zone_leaves_existing_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("parcels.dxf");
    let before = seed(&output);
    let source = FakeSource::new(&[
        ("020301_1.0001.1/1", square(0.0, 0.0)),
        ("101511_1.0016.164/1", square(0.0, 0.0)),
    ]);

    let err = use_case(source)
        .execute(DrawParcelsInput::new(
            ids(&["020301_1.0001.1/1", "101511_1.0016.164/1"]),
            RunOptions::new(&output),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DrawParcelsError::WrongZone { .. }));
    assert_eq!(std::fs::read(&output).unwrap(), before);
}

#[tokio::test]
async fn unknown_zone_after_anchor_leaves_existing_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("parcels.dxf");
    let before = seed(&output);
    let source = FakeSource::new(&[
        ("020301_1.0001.1", square(0.0, 0.0)),
        ("999901_1.0001.2", square(20.0, 0.0)),
    ]);

    let err = use_case(source)
        .execute(DrawParcelsInput::new(
            ids(&["020301_1.0001.1", "999901_1.0001.2"]),
            RunOptions::new(&output),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DrawParcelsError::ZoneUnknown { .. }));
    assert_eq!(std::fs::read(&output).unwrap(), before);
}

#[tokio::test]
async fn cancelled_run_leaves_file_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("parcels.dxf");
    let before = seed(&output);
    let values = [
        "020301_1.0001.1",
        "020301_1.0001.2",
        "020301_1.0001.3",
        "020301_1.0001.4",
    ];
    let entries: Vec<(&str, Polygon)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (*v, square(i as f64 * 20.0, 100.0)))
        .collect();
    let token = CancellationToken::new();
    let progress = CancelAfter {
        count: 2,
        token: token.clone(),
        seen: Mutex::new(0),
    };

    let report = use_case(FakeSource::new(&entries))
        .with_cancellation(token)
        .execute_with_progress(
            DrawParcelsInput::new(ids(&values), RunOptions::new(&output)),
            &progress,
        )
        .await
        .unwrap();

    assert_eq!(report.state, RunState::Cancelled);
    assert_eq!(std::fs::read(&output).unwrap(), before);
}

#[tokio::test]
async fn appends_to_existing_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("parcels.dxf");
    seed(&output);
    let source = FakeSource::new(&[("020301_1.0001.1/1", square(50.0, 50.0))]);

    use_case(source)
        .execute(DrawParcelsInput::new(
            ids(&["020301_1.0001.1/1"]),
            RunOptions::new(&output),
        ))
        .await
        .unwrap();

    let drawing = Drawing::load_file(&output).unwrap();
    assert_eq!(drawing.entities().count(), 2);
}

#[tokio::test]
async fn missing_output_directory_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("parcels.dxf");
    let source = FakeSource::new(&[("020301_1.0001.1/1", square(0.0, 0.0))]);

    let err = use_case(source)
        .execute(DrawParcelsInput::new(
            ids(&["020301_1.0001.1/1"]),
            RunOptions::new(&output),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DrawParcelsError::Save(_)));
    assert!(!output.exists());
}
