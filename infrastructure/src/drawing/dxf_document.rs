//! DXF implementation of the drawing ports, built on the `dxf` crate.

use dxf::entities::{Entity, EntityType, Line, LwPolyline, Text};
use dxf::enums::AcadVersion;
use dxf::tables::Layer;
use dxf::{Color, Drawing, LwPolylineVertex};
use parcel_application::{DrawingDocument, DrawingError, DrawingStore};
use parcel_domain::{AciColor, Point};
use std::path::Path;
use tracing::{debug, info, warn};

/// Version written for new documents
pub const DEFAULT_VERSION: AcadVersion = AcadVersion::R2010;

/// Opens DXF files as [`DxfDocument`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfDrawingStore;

impl DxfDrawingStore {
    pub fn new() -> Self {
        Self
    }
}

impl DrawingStore for DxfDrawingStore {
    fn open_or_create(&self, path: &Path) -> Box<dyn DrawingDocument> {
        Box::new(DxfDocument::open_or_create(path))
    }
}

/// An in-memory DXF drawing
pub struct DxfDocument {
    drawing: Drawing,
}

impl DxfDocument {
    /// Start an empty R2010 drawing
    pub fn new() -> Self {
        let mut drawing = Drawing::new();
        drawing.header.version = DEFAULT_VERSION;
        Self { drawing }
    }

    /// Load `path` if it exists and parses; otherwise start empty.
    pub fn open_or_create(path: &Path) -> Self {
        if !path.exists() {
            debug!("{} does not exist, creating a new drawing", path.display());
            return Self::new();
        }

        match Drawing::load_file(path) {
            Ok(mut drawing) => {
                // LWPOLYLINE only exists from R2000 on
                if drawing.header.version < AcadVersion::R2000 {
                    info!(
                        "Upgrading {} from {:?} to {:?}",
                        path.display(),
                        drawing.header.version,
                        DEFAULT_VERSION
                    );
                    drawing.header.version = DEFAULT_VERSION;
                }
                info!("Loaded existing drawing {}", path.display());
                Self { drawing }
            }
            Err(e) => {
                warn!(
                    "Could not read {} ({}), starting a new drawing",
                    path.display(),
                    e
                );
                Self::new()
            }
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    fn push(&mut self, specific: EntityType, layer: &str, color: AciColor) {
        let mut entity = Entity::new(specific);
        entity.common.layer = layer.to_string();
        entity.common.color = Color::from_index(color.index());
        self.drawing.add_entity(entity);
    }
}

impl Default for DxfDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn dxf_point(point: &Point) -> dxf::Point {
    dxf::Point::new(point.x, point.y, 0.0)
}

impl DrawingDocument for DxfDocument {
    fn ensure_layer(&mut self, name: &str, color: AciColor) {
        if self
            .drawing
            .layers()
            .any(|layer| layer.name.eq_ignore_ascii_case(name))
        {
            return;
        }
        self.drawing.add_layer(Layer {
            name: name.to_string(),
            color: Color::from_index(color.index()),
            ..Default::default()
        });
    }

    fn add_polygon(&mut self, points: &[Point], layer: &str, color: AciColor) -> usize {
        if points.len() < 2 {
            warn!("Skipping polygon with {} vertices", points.len());
            return 0;
        }
        let mut polyline = LwPolyline {
            vertices: points
                .iter()
                .map(|p| LwPolylineVertex {
                    x: p.x,
                    y: p.y,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        polyline.set_is_closed(true);
        self.push(EntityType::LwPolyline(polyline), layer, color);
        1
    }

    fn add_line_segments(&mut self, points: &[Point], layer: &str, color: AciColor) -> usize {
        let mut added = 0;
        for pair in points.windows(2) {
            let line = Line::new(dxf_point(&pair[0]), dxf_point(&pair[1]));
            self.push(EntityType::Line(line), layer, color);
            added += 1;
        }
        added
    }

    fn add_text(&mut self, text: &str, position: Point, height: f64, layer: &str, color: AciColor) {
        let text = Text {
            location: dxf_point(&position),
            text_height: height,
            value: text.to_string(),
            ..Default::default()
        };
        self.push(EntityType::Text(text), layer, color);
    }

    fn entity_count(&self) -> usize {
        self.drawing.entities().count()
    }

    fn save(&mut self, path: &Path) -> Result<(), DrawingError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(DrawingError::PathNotFound(parent.to_path_buf()));
        }
        self.drawing
            .save_file(path)
            .map_err(|e| DrawingError::Write(e.to_string()))?;
        info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_domain::{IDENTIFIER_LAYER, LINES_LAYER, POLYGON_LAYER};

    fn square() -> Vec<Point> {
        vec![
            Point { x: 100.0, y: 200.0 },
            Point { x: 110.0, y: 200.0 },
            Point { x: 110.0, y: 210.0 },
            Point { x: 100.0, y: 210.0 },
        ]
    }

    fn reload(path: &Path) -> Drawing {
        Drawing::load_file(path).unwrap()
    }

    #[test]
    fn test_missing_file_creates_r2010_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let doc = DxfDocument::open_or_create(&dir.path().join("new.dxf"));
        assert_eq!(doc.drawing().header.version, AcadVersion::R2010);
        assert_eq!(doc.entity_count(), 0);
    }

    #[test]
    fn test_unreadable_file_creates_new_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.dxf");
        std::fs::write(&path, "this is not a drawing").unwrap();

        let doc = DxfDocument::open_or_create(&path);
        assert_eq!(doc.entity_count(), 0);
    }

    #[test]
    fn test_polygon_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.dxf");

        let mut doc = DxfDocument::open_or_create(&path);
        doc.ensure_layer(POLYGON_LAYER, AciColor::GREEN);
        doc.add_polygon(&square(), POLYGON_LAYER, AciColor::GREEN);
        doc.save(&path).unwrap();

        let drawing = reload(&path);
        let entities: Vec<_> = drawing.entities().collect();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].common.layer, POLYGON_LAYER);
        assert_eq!(entities[0].common.color.index(), Some(3));
        match &entities[0].specific {
            EntityType::LwPolyline(polyline) => {
                assert!(polyline.is_closed());
                assert_eq!(polyline.vertices.len(), 4);
                for (vertex, expected) in polyline.vertices.iter().zip(square()) {
                    assert!((vertex.x - expected.x).abs() < 1e-9);
                    assert!((vertex.y - expected.y).abs() < 1e-9);
                }
            }
            other => panic!("expected LWPOLYLINE, got {other:?}"),
        }
        assert!(drawing.layers().any(|l| l.name == POLYGON_LAYER));
    }

    #[test]
    fn test_line_segments_do_not_close() {
        let mut doc = DxfDocument::new();
        let mut points = square();
        points.push(points[0]);

        let added = doc.add_line_segments(&points, LINES_LAYER, AciColor::RED);
        assert_eq!(added, 4);
        assert_eq!(doc.entity_count(), 4);

        let open = square();
        assert_eq!(doc.add_line_segments(&open, LINES_LAYER, AciColor::RED), 3);
        assert_eq!(doc.add_line_segments(&open[..1], LINES_LAYER, AciColor::RED), 0);
    }

    #[test]
    fn test_text_entity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.dxf");

        let mut doc = DxfDocument::new();
        doc.add_text("164/1", Point { x: 5.0, y: 6.0 }, 2.5, IDENTIFIER_LAYER, AciColor::BLUE);
        doc.save(&path).unwrap();

        let drawing = reload(&path);
        let entity = drawing.entities().next().unwrap();
        assert_eq!(entity.common.layer, IDENTIFIER_LAYER);
        match &entity.specific {
            EntityType::Text(text) => {
                assert_eq!(text.value, "164/1");
                assert_eq!(text.text_height, 2.5);
                assert!((text.location.x - 5.0).abs() < 1e-9);
            }
            other => panic!("expected TEXT, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_layer_is_idempotent_and_keeps_existing_color() {
        let mut doc = DxfDocument::new();
        doc.ensure_layer(POLYGON_LAYER, AciColor::RED);
        doc.ensure_layer(POLYGON_LAYER, AciColor::BLUE);

        let layers: Vec<_> = doc
            .drawing()
            .layers()
            .filter(|l| l.name == POLYGON_LAYER)
            .collect();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].color.index(), Some(1));
    }

    #[test]
    fn test_ensure_layer_matches_names_case_insensitively() {
        let mut doc = DxfDocument::new();
        doc.ensure_layer("PLOT_AS_POLYGON", AciColor::RED);
        doc.ensure_layer(POLYGON_LAYER, AciColor::BLUE);

        let layers = doc
            .drawing()
            .layers()
            .filter(|l| l.name.eq_ignore_ascii_case(POLYGON_LAYER))
            .count();
        assert_eq!(layers, 1);
    }

    #[test]
    fn test_degenerate_polygon_adds_nothing() {
        let mut doc = DxfDocument::new();
        assert_eq!(doc.add_polygon(&square()[..1], POLYGON_LAYER, AciColor::RED), 0);
        assert_eq!(doc.add_polygon(&[], POLYGON_LAYER, AciColor::RED), 0);
        assert_eq!(doc.entity_count(), 0);

        assert_eq!(doc.add_polygon(&square(), POLYGON_LAYER, AciColor::RED), 1);
        assert_eq!(doc.entity_count(), 1);
    }

    #[test]
    fn test_existing_content_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.dxf");

        let mut first = DxfDocument::new();
        first.add_polygon(&square(), POLYGON_LAYER, AciColor::WHITE);
        first.save(&path).unwrap();

        let mut second = DxfDocument::open_or_create(&path);
        assert_eq!(second.entity_count(), 1);
        second.add_text("1", Point { x: 0.0, y: 0.0 }, 2.5, IDENTIFIER_LAYER, AciColor::WHITE);
        second.save(&path).unwrap();

        assert_eq!(reload(&path).entities().count(), 2);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dxf");

        let mut doc = DxfDocument::new();
        let err = doc.save(&path).unwrap_err();
        assert!(matches!(err, DrawingError::PathNotFound(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_store_opens_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = DxfDrawingStore::new();
        let doc = store.open_or_create(&dir.path().join("x.dxf"));
        assert_eq!(doc.entity_count(), 0);
    }
}
