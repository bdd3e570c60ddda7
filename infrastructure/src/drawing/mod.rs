//! Drawing adapters

mod dxf_document;

pub use dxf_document::{DEFAULT_VERSION, DxfDocument, DxfDrawingStore};
