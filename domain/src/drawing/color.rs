//! AutoCAD Color Index value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An AutoCAD Color Index (1..=255) used for layers and entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "u8")]
pub struct AciColor(u8);

impl AciColor {
    pub const RED: AciColor = AciColor(1);
    pub const YELLOW: AciColor = AciColor(2);
    pub const GREEN: AciColor = AciColor(3);
    pub const CYAN: AciColor = AciColor(4);
    pub const BLUE: AciColor = AciColor(5);
    pub const MAGENTA: AciColor = AciColor(6);
    /// Black on light backgrounds, white on dark ones
    pub const WHITE: AciColor = AciColor(7);

    pub fn new(index: u8) -> Result<Self, DomainError> {
        if index == 0 {
            return Err(DomainError::InvalidColor(
                "0 is BYBLOCK, not a color".to_string(),
            ));
        }
        Ok(Self(index))
    }

    pub fn index(&self) -> u8 {
        self.0
    }
}

impl Default for AciColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for AciColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.0 {
            1 => "red",
            2 => "yellow",
            3 => "green",
            4 => "cyan",
            5 => "blue",
            6 => "magenta",
            7 => "white",
            _ => return write!(f, "aci {}", self.0),
        };
        write!(f, "{name}")
    }
}

impl FromStr for AciColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let named = match s.trim().to_lowercase().as_str() {
            "red" => Some(Self::RED),
            "yellow" => Some(Self::YELLOW),
            "green" => Some(Self::GREEN),
            "cyan" => Some(Self::CYAN),
            "blue" => Some(Self::BLUE),
            "magenta" => Some(Self::MAGENTA),
            "black" | "white" => Some(Self::WHITE),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }
        s.trim()
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidColor(s.to_string()))
            .and_then(Self::new)
    }
}

impl From<AciColor> for u8 {
    fn from(color: AciColor) -> Self {
        color.0
    }
}

/// Accepts either `3` or `"green"` in config files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<ColorRepr> for AciColor {
    type Error = DomainError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Index(index) => AciColor::new(index),
            ColorRepr::Name(name) => name.parse(),
        }
    }
}
