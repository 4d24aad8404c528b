//! Dataset profile definition types.
//!
//! A profile names the two input files, the street-name filter, and the
//! declared null defaults applied before serialization. Profiles are
//! TOML documents; the built-in one is embedded by `street_lvi_dataset`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{AttributeValue, ColumnKind};

/// Largest magnitude at which every whole `f64` is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A street/boundary dataset pair and how to prepare it for serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Unique profile identifier (e.g., `"chicago_street_lvi"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Street segment geometry file.
    pub streets: DatasetSource,
    /// Municipal boundary geometry file.
    pub boundaries: DatasetSource,
    /// Which street records to keep.
    pub street_filter: StreetFilterConfig,
    /// Replacement values for nulls in known nullable fields.
    #[serde(default)]
    pub null_defaults: Vec<NullDefault>,
}

impl DatasetProfile {
    /// Returns the declared default for `field`, if any.
    #[must_use]
    pub fn null_default(&self, field: &str) -> Option<&DefaultValue> {
        self.null_defaults
            .iter()
            .find(|d| d.field == field)
            .map(|d| &d.default)
    }
}

/// Location of a geometry file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    /// Path to the file, relative to the working directory unless absolute.
    pub path: PathBuf,
}

/// Substring filter applied to the street dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetFilterConfig {
    /// Attribute holding the normalized block name.
    pub field: String,
    /// Street-name fragments; a record is kept if its block name contains
    /// any of them, ignoring case.
    pub substrings: Vec<String>,
}

/// A nullable field and the value that replaces its nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullDefault {
    /// Attribute name.
    pub field: String,
    /// Replacement value.
    pub default: DefaultValue,
}

/// A typed default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Numeric default.
    Number(f64),
    /// Text default.
    Text(String),
}

impl DefaultValue {
    /// The attribute value substituted for a null.
    ///
    /// Whole numbers become integers; numeric columns widen them back to
    /// floats during normalization.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_attribute(&self) -> AttributeValue {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
                AttributeValue::Integer(*n as i64)
            }
            Self::Number(n) => AttributeValue::Float(*n),
            Self::Text(s) => AttributeValue::String(s.clone()),
        }
    }

    /// The column kind a filled column takes on.
    #[must_use]
    pub const fn kind(&self) -> ColumnKind {
        match self {
            Self::Number(_) => ColumnKind::Float,
            Self::Text(_) => ColumnKind::String,
        }
    }
}
