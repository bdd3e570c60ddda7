//! Drawing vocabulary shared by the pipeline and the document adapter.

pub mod color;
pub mod mode;
