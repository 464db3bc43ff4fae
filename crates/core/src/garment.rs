//! Garment attributes and try-on categories.

use serde::{Deserialize, Serialize};

/// Which part of the body the garment covers.
///
/// Unrecognised names are preserved as [`GarmentCategory::Other`] so the
/// request can still be served with a generic prompt phrase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GarmentCategory {
    #[default]
    UpperBody,
    LowerBody,
    Dresses,
    Other(String),
}

impl GarmentCategory {
    /// Parse a category wire name. Blank input yields the default.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "upper_body" => Self::UpperBody,
            "lower_body" => Self::LowerBody,
            "dresses" => Self::Dresses,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::UpperBody => "upper_body",
            Self::LowerBody => "lower_body",
            Self::Dresses => "dresses",
            Self::Other(name) => name,
        }
    }
}

impl Serialize for GarmentCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GarmentCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// The descriptive attributes of a garment used for prompt construction.
///
/// Every field is optional; blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GarmentDescription {
    pub name: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub brand: Option<String>,
}
