//! Planar polygon geometry on top of `geo`.
//!
//! Axis order is always (easting, northing): `x` is the easting and `y`
//! the northing, whatever order a coordinate system's definition uses.

use geo::{Centroid, MapCoords};

/// A 2D point in projected coordinates
pub type Point = geo::Coord<f64>;

/// An ordered sequence of vertices forming a polygon boundary
pub type Ring = geo::LineString<f64>;

/// Vertex access for boundary rings
pub trait RingExt {
    /// Vertices without the closing duplicate of the first point.
    fn open_points(&self) -> &[Point];
}

impl RingExt for Ring {
    fn open_points(&self) -> &[Point] {
        let points = self.0.as_slice();
        match points {
            [first, .., last] if first == last => &points[..points.len() - 1],
            _ => points,
        }
    }
}

/// An immutable polygon: exterior ring plus optional holes.
///
/// Rings are closed on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    inner: geo::Polygon<f64>,
}

impl Polygon {
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            inner: geo::Polygon::new(exterior, interiors),
        }
    }

    pub fn from_exterior(points: Vec<Point>) -> Self {
        Self::new(Ring::new(points), Vec::new())
    }

    pub fn exterior(&self) -> &Ring {
        self.inner.exterior()
    }

    pub fn interiors(&self) -> &[Ring] {
        self.inner.interiors()
    }

    /// Exterior ring followed by every interior ring.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(self.exterior()).chain(self.interiors().iter())
    }

    pub fn vertex_count(&self) -> usize {
        self.rings().map(|ring| ring.0.len()).sum()
    }

    /// Area centroid with holes subtracted, used as the label anchor.
    pub fn centroid(&self) -> Option<Point> {
        self.inner.centroid().map(Point::from)
    }

    /// Apply a pointwise transform, keeping ring count, vertex count and
    /// order.
    pub fn map_points<F>(&self, f: F) -> Polygon
    where
        F: Fn(Point) -> Point + Copy,
    {
        Self {
            inner: self.inner.map_coords(f),
        }
    }

    pub fn as_geo(&self) -> &geo::Polygon<f64> {
        &self.inner
    }
}

impl From<geo::Polygon<f64>> for Polygon {
    fn from(inner: geo::Polygon<f64>) -> Self {
        Self { inner }
    }
}
