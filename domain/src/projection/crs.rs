//! Supported coordinate reference systems

use crate::core::error::DomainError;
use crate::projection::tmerc::TmParams;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// National grid systems handled by the reprojector.
///
/// All of them are Transverse Mercator projections of the GRS80 ellipsoid
/// on the ETRF89 datum, so converting between them needs no datum shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Crs {
    /// PUWG 1992 (EPSG:2180), the service's native system
    Puwg1992,
    Puwg2000Zone5,
    Puwg2000Zone6,
    Puwg2000Zone7,
    Puwg2000Zone8,
}

impl Crs {
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Puwg1992 => 2180,
            Crs::Puwg2000Zone5 => 2176,
            Crs::Puwg2000Zone6 => 2177,
            Crs::Puwg2000Zone7 => 2178,
            Crs::Puwg2000Zone8 => 2179,
        }
    }

    pub fn from_epsg(code: u32) -> Result<Self, DomainError> {
        match code {
            2180 => Ok(Crs::Puwg1992),
            2176 => Ok(Crs::Puwg2000Zone5),
            2177 => Ok(Crs::Puwg2000Zone6),
            2178 => Ok(Crs::Puwg2000Zone7),
            2179 => Ok(Crs::Puwg2000Zone8),
            other => Err(DomainError::UnsupportedCrs(format!("EPSG:{other}"))),
        }
    }

    /// Projection parameters (central meridian, scale, false origin).
    pub fn tm_params(&self) -> TmParams {
        match self {
            Crs::Puwg1992 => TmParams {
                central_meridian_deg: 19.0,
                scale: 0.9993,
                false_easting: 500_000.0,
                false_northing: -5_300_000.0,
            },
            Crs::Puwg2000Zone5 => Self::puwg2000(5),
            Crs::Puwg2000Zone6 => Self::puwg2000(6),
            Crs::Puwg2000Zone7 => Self::puwg2000(7),
            Crs::Puwg2000Zone8 => Self::puwg2000(8),
        }
    }

    fn puwg2000(zone: u8) -> TmParams {
        TmParams {
            central_meridian_deg: 3.0 * f64::from(zone),
            scale: 0.999923,
            false_easting: f64::from(zone) * 1_000_000.0 + 500_000.0,
            false_northing: 0.0,
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl FromStr for Crs {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = trimmed
            .strip_prefix("EPSG:")
            .or_else(|| trimmed.strip_prefix("epsg:"))
            .unwrap_or(trimmed);
        code.parse::<u32>()
            .map_err(|_| DomainError::UnsupportedCrs(s.to_string()))
            .and_then(Self::from_epsg)
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.to_string()
    }
}

impl TryFrom<String> for Crs {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
