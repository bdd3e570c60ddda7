//! Error policy adapters for the presentation layer

pub mod interactive;
