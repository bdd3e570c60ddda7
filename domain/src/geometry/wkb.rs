//! Well-Known Binary polygon decoding.
//!
//! Accepts OGC WKB, ISO WKB (Z/M/ZM type codes) and PostGIS EWKB (SRID and
//! dimension flags in the type word), in either byte order. Only polygons
//! are decoded; a multipolygon with a single member is unwrapped.

use crate::geometry::polygon::{Point, Polygon, Ring};
use thiserror::Error;

const WKB_POLYGON: u32 = 3;
const WKB_MULTIPOLYGON: u32 = 6;

const EWKB_Z_FLAG: u32 = 0x8000_0000;
const EWKB_M_FLAG: u32 = 0x4000_0000;
const EWKB_SRID_FLAG: u32 = 0x2000_0000;

/// Errors decoding a hex/WKB payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WkbError {
    #[error("Invalid hex payload: {0}")]
    InvalidHex(String),

    #[error("Unexpected end of WKB data at byte {0}")]
    Truncated(usize),

    #[error("Invalid byte order marker: {0:#04x}")]
    InvalidByteOrder(u8),

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(u32),

    #[error("Multipolygon with {0} members cannot be drawn as one parcel")]
    MultiplePolygons(u32),

    #[error("Polygon has no exterior ring")]
    EmptyPolygon,

    #[error("Trailing bytes after geometry: {0}")]
    TrailingBytes(usize),
}

/// A decoded polygon together with the SRID embedded in EWKB, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPolygon {
    pub polygon: Polygon,
    pub srid: Option<u32>,
}

/// Decode a hex string into bytes.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, WkbError> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(WkbError::InvalidHex(format!(
            "odd number of digits ({})",
            text.len()
        )));
    }
    text.as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .filter(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| {
                    WkbError::InvalidHex(format!(
                        "'{}' is not a hex byte",
                        String::from_utf8_lossy(pair)
                    ))
                })
        })
        .collect()
}

/// Decode a hex-encoded (E)WKB polygon.
///
/// A leading `SRID=<n>;` (EWKT-style prefix some services emit) is
/// stripped and its value reported as the SRID.
pub fn decode_hex_polygon(text: &str) -> Result<DecodedPolygon, WkbError> {
    let text = text.trim();
    let (prefix_srid, hex) = match text.strip_prefix("SRID=").and_then(|rest| rest.split_once(';')) {
        Some((srid, hex)) => (srid.trim().parse::<u32>().ok(), hex),
        None => (None, text),
    };
    let bytes = decode_hex(hex)?;
    let mut decoded = decode_polygon(&bytes)?;
    if decoded.srid.is_none() {
        decoded.srid = prefix_srid;
    }
    Ok(decoded)
}

/// Decode a binary (E)WKB polygon.
pub fn decode_polygon(bytes: &[u8]) -> Result<DecodedPolygon, WkbError> {
    let mut reader = WkbReader::new(bytes);
    let decoded = reader.read_geometry()?;
    if reader.remaining() > 0 {
        return Err(WkbError::TrailingBytes(reader.remaining()));
    }
    Ok(decoded)
}

/// Parsed geometry header
struct Header {
    base_type: u32,
    dims: usize,
    srid: Option<u32>,
}

struct WkbReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> WkbReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            little_endian: true,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], WkbError> {
        let end = self.pos + N;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(WkbError::Truncated(self.pos))?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_u32(&mut self) -> Result<u32, WkbError> {
        let raw = self.take::<4>()?;
        Ok(if self.little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    }

    fn read_f64(&mut self) -> Result<f64, WkbError> {
        let raw = self.take::<8>()?;
        Ok(if self.little_endian {
            f64::from_le_bytes(raw)
        } else {
            f64::from_be_bytes(raw)
        })
    }

    /// Read a count and make sure the data can actually hold that many
    /// items of `item_size` bytes, so corrupt counts fail fast.
    fn read_count(&mut self, item_size: usize) -> Result<u32, WkbError> {
        let count = self.read_u32()?;
        if (count as usize).saturating_mul(item_size) > self.remaining() {
            return Err(WkbError::Truncated(self.bytes.len()));
        }
        Ok(count)
    }

    fn read_header(&mut self) -> Result<Header, WkbError> {
        let [order] = self.take::<1>()?;
        self.little_endian = match order {
            0 => false,
            1 => true,
            other => return Err(WkbError::InvalidByteOrder(other)),
        };

        let raw_type = self.read_u32()?;
        let mut dims = 2;
        if raw_type & EWKB_Z_FLAG != 0 {
            dims += 1;
        }
        if raw_type & EWKB_M_FLAG != 0 {
            dims += 1;
        }
        let srid = if raw_type & EWKB_SRID_FLAG != 0 {
            Some(self.read_u32()?)
        } else {
            None
        };

        // ISO codes: 1000 = Z, 2000 = M, 3000 = ZM
        let code = raw_type & 0x0FFF_FFFF;
        let base_type = code % 1000;
        dims += match code / 1000 {
            1 | 2 => 1,
            3 => 2,
            _ => 0,
        };

        Ok(Header {
            base_type,
            dims,
            srid,
        })
    }

    fn read_geometry(&mut self) -> Result<DecodedPolygon, WkbError> {
        let header = self.read_header()?;
        match header.base_type {
            WKB_POLYGON => Ok(DecodedPolygon {
                polygon: self.read_polygon_body(header.dims)?,
                srid: header.srid,
            }),
            WKB_MULTIPOLYGON => {
                // Smallest member: 1 byte order + 4 type + 4 ring count
                let count = self.read_count(9)?;
                if count != 1 {
                    return Err(WkbError::MultiplePolygons(count));
                }
                let member = self.read_header()?;
                if member.base_type != WKB_POLYGON {
                    return Err(WkbError::UnsupportedGeometry(member.base_type));
                }
                Ok(DecodedPolygon {
                    polygon: self.read_polygon_body(member.dims)?,
                    srid: header.srid.or(member.srid),
                })
            }
            other => Err(WkbError::UnsupportedGeometry(other)),
        }
    }

    fn read_polygon_body(&mut self, dims: usize) -> Result<Polygon, WkbError> {
        let ring_count = self.read_count(4)?;
        if ring_count == 0 {
            return Err(WkbError::EmptyPolygon);
        }
        let mut rings = Vec::with_capacity(ring_count as usize);
        for _ in 0..ring_count {
            rings.push(self.read_ring(dims)?);
        }
        let exterior = rings.remove(0);
        Ok(Polygon::new(exterior, rings))
    }

    fn read_ring(&mut self, dims: usize) -> Result<Ring, WkbError> {
        let point_count = self.read_count(dims * 8)?;
        let mut points = Vec::with_capacity(point_count as usize);
        for _ in 0..point_count {
            let x = self.read_f64()?;
            let y = self.read_f64()?;
            for _ in 2..dims {
                self.read_f64()?;
            }
            points.push(Point { x, y });
        }
        Ok(Ring::new(points))
    }
}
