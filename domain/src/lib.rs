//! Domain layer for parcel-drawer
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Parcels and zones
//!
//! A parcel identifier starts with a four-digit county code. Each county lies
//! in exactly one PUWG 2000 zone, so [`ZoneTable::classify`] maps an
//! identifier to its [`Zone`] without any I/O.
//!
//! ## Geometry
//!
//! Parcel boundaries arrive as hex-encoded (E)WKB and are decoded into an
//! immutable [`Polygon`] in (easting, northing) order.
//!
//! ## Projections
//!
//! [`Reprojector`] moves coordinates between PUWG 1992 (EPSG:2180) and the
//! four PUWG 2000 zones (EPSG:2176–2179).

pub mod config;
pub mod core;
pub mod drawing;
pub mod geometry;
pub mod parcel;
pub mod projection;
pub mod run;

// Re-export commonly used types
pub use config::{
    OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::error::DomainError;
pub use drawing::{
    color::AciColor,
    mode::{DrawMode, IDENTIFIER_LAYER, LINES_LAYER, POLYGON_LAYER},
};
pub use geometry::{
    polygon::{Point, Polygon, Ring, RingExt},
    wkb::{DecodedPolygon, WkbError, decode_hex_polygon, decode_polygon},
};
pub use parcel::{
    identifier::ParcelId,
    zone::{OverlappingPrefix, Zone, ZoneTable},
};
pub use projection::{crs::Crs, reproject::Reprojector};
pub use run::{ErrorDecision, RunState};
