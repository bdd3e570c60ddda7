//! ULDK (Usługa Lokalizacji Działek Katastralnych) parcel service adapter

mod response;
mod source;

pub use response::{XML_ERROR_MARKER, parse_uldk_response};
pub use source::UldkGeometrySource;
