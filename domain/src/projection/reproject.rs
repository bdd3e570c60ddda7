//! Pointwise reprojection of polygons between national grids.

use crate::geometry::polygon::{Point, Polygon};
use crate::projection::crs::Crs;
use crate::projection::tmerc::TransverseMercator;

/// Converts coordinates from one grid to another.
///
/// Input and output are always (easting, northing); EPSG axis order for
/// these systems (northing first) is never applied.
#[derive(Debug, Clone)]
pub struct Reprojector {
    source: Crs,
    target: Crs,
    from: TransverseMercator,
    to: TransverseMercator,
}

impl Reprojector {
    pub fn new(source: Crs, target: Crs) -> Self {
        Self {
            source,
            target,
            from: TransverseMercator::new(source.tm_params()),
            to: TransverseMercator::new(target.tm_params()),
        }
    }

    pub fn source(&self) -> Crs {
        self.source
    }

    pub fn target(&self) -> Crs {
        self.target
    }

    pub fn transform_point(&self, point: Point) -> Point {
        if self.source == self.target {
            return point;
        }
        let geodetic = self.from.inverse(point.x, point.y);
        let (x, y) = self.to.forward(geodetic);
        Point { x, y }
    }

    /// Transform every vertex of every ring, keeping count and order.
    pub fn transform(&self, polygon: &Polygon) -> Polygon {
        polygon.map_points(|p| self.transform_point(p))
    }
}

/// One-shot helper for a single geometry
pub fn transform(polygon: &Polygon, source: Crs, target: Crs) -> Polygon {
    Reprojector::new(source, target).transform(polygon)
}
