//! Parcel geometry.
//!
//! - [`polygon`] - points, rings and polygons in projected coordinates
//! - [`wkb`] - hex / (E)WKB decoding of service payloads

pub mod polygon;
pub mod wkb;
