//! Use cases (application services)

pub mod draw_parcels;
