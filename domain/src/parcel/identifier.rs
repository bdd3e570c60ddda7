//! Parcel identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Length of the administrative (TERYT county) prefix that selects the zone.
pub const ZONE_PREFIX_LEN: usize = 4;

/// A cadastral parcel identifier (Value Object)
///
/// Opaque token such as `101511_1.0016.164/1`. The first four characters
/// are the county code used to pick the projection zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParcelId {
    value: String,
}

impl ParcelId {
    /// Try to create an identifier, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyIdentifier);
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Parse a comma separated list, skipping empty entries.
    ///
    /// Newlines are accepted as separators too, so identifier files with one
    /// parcel per line work the same as comma separated ones.
    pub fn parse_list(input: &str) -> Vec<Self> {
        input
            .split([',', '\n', '\r'])
            .filter_map(|token| Self::new(token).ok())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The zone-discriminating prefix (first four characters).
    ///
    /// Returns `None` when the identifier is shorter than the prefix.
    pub fn zone_prefix(&self) -> Option<&str> {
        match self.value.char_indices().nth(ZONE_PREFIX_LEN) {
            Some((end, _)) => Some(&self.value[..end]),
            None if self.value.chars().count() == ZONE_PREFIX_LEN => Some(&self.value),
            None => None,
        }
    }

    /// Text used for the drawing label: the segment after the last `.`.
    pub fn short_label(&self) -> &str {
        self.value.rsplit('.').next().unwrap_or(&self.value)
    }
}

impl std::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for ParcelId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ParcelId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParcelId> for String {
    fn from(id: ParcelId) -> Self {
        id.value
    }
}
