//! Coordinate reference systems and reprojection.
//!
//! - [`crs::Crs`] - PUWG 1992 and the four PUWG 2000 zones
//! - [`tmerc::TransverseMercator`] - GRS80 Transverse Mercator math
//! - [`reproject::Reprojector`] - pointwise polygon transform

pub mod crs;
pub mod reproject;
pub mod tmerc;
