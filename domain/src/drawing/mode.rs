//! How parcel outlines are rendered

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Layer receiving closed polylines
pub const POLYGON_LAYER: &str = "plot_as_polygon";
/// Layer receiving discrete line segments
pub const LINES_LAYER: &str = "plot_as_lines";
/// Layer receiving identifier labels
pub const IDENTIFIER_LAYER: &str = "identifier_layer";

/// Rendering style for a parcel outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// One closed polyline per parcel (default)
    #[default]
    Polygon,
    /// One line entity per boundary edge
    Lines,
}

impl DrawMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::Polygon => "polygon",
            DrawMode::Lines => "lines",
        }
    }

    /// Layer the outline entities are placed on
    pub fn layer_name(&self) -> &'static str {
        match self {
            DrawMode::Polygon => POLYGON_LAYER,
            DrawMode::Lines => LINES_LAYER,
        }
    }
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polygon" | "polygons" | "poly" => Ok(DrawMode::Polygon),
            "lines" | "line" => Ok(DrawMode::Lines),
            _ => Err(DomainError::InvalidDrawMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_polygon() {
        assert_eq!(DrawMode::default(), DrawMode::Polygon);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(DrawMode::Polygon.layer_name(), "plot_as_polygon");
        assert_eq!(DrawMode::Lines.layer_name(), "plot_as_lines");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Lines".parse::<DrawMode>().unwrap(), DrawMode::Lines);
        assert_eq!("polygon".parse::<DrawMode>().unwrap(), DrawMode::Polygon);
        assert!("hatch".parse::<DrawMode>().is_err());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&DrawMode::Lines).unwrap();
        assert_eq!(json, "\"lines\"");
    }
}
