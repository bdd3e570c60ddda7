//! ULDK `GetParcelById` payload parsing
//!
//! The service answers with plain text: a status line, then the geometry as
//! hex-encoded EWKB (`SRID=2180;0103000020...`). Errors come back with a
//! `-1` status or with a Polish error sentence in place of the geometry.

use parcel_application::FetchError;
use parcel_domain::{ParcelId, Polygon, decode_hex_polygon};
use tracing::debug;

/// Text the service puts in place of the geometry when the lookup failed
pub const XML_ERROR_MARKER: &str = "błędny format odpowiedzi XML";

/// Turn a response body into a polygon or a per-parcel error
pub fn parse_uldk_response(id: &ParcelId, body: &str) -> Result<Polygon, FetchError> {
    let mut lines = body.lines();
    let status = lines.next().unwrap_or("").trim();

    if let Some(rest) = status.strip_prefix("-1") {
        let message = rest.trim();
        let message = if message.is_empty() {
            "service returned status -1"
        } else {
            message
        };
        return Err(FetchError::not_found(id, message));
    }

    let payload = lines.next().map(str::trim).unwrap_or("");
    if payload.is_empty() {
        return Err(FetchError::not_found(id, "service returned no geometry"));
    }
    if payload.contains(XML_ERROR_MARKER) {
        return Err(FetchError::not_found(id, payload));
    }

    let decoded = decode_hex_polygon(payload)
        .map_err(|e| FetchError::server_response(id, format!("invalid geometry: {e}")))?;
    debug!(
        "{}: {} vertices, srid {:?}",
        id,
        decoded.polygon.vertex_count(),
        decoded.srid
    );
    Ok(decoded.polygon)
}
