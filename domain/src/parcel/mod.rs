//! Parcel identity and zone classification.
//!
//! - [`identifier::ParcelId`] - validated cadastral identifier
//! - [`zone::Zone`] / [`zone::ZoneTable`] - county prefix → PUWG 2000 zone

pub mod identifier;
pub mod zone;
