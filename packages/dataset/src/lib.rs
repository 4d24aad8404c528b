#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading, filtering, and `GeoJSON` normalization of the street LVI
//! datasets.
//!
//! The pipeline runs once at startup: [`load::load_collection`] reads a
//! geometry file into a [`VectorRecordCollection`], [`filter::StreetFilter`]
//! narrows the street segments to the configured street names, and
//! [`normalize::normalize`] fills declared null defaults and produces a
//! strict `GeoJSON` `FeatureCollection`.
//!
//! [`VectorRecordCollection`]: street_lvi_dataset_models::VectorRecordCollection

pub mod filter;
pub mod load;
pub mod normalize;
pub mod profile;

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a geometry file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid `GeoJSON`.
    #[error("Failed to parse GeoJSON in {path:?}: {source}")]
    Parse {
        /// File being read.
        path: PathBuf,
        /// Underlying JSON or `GeoJSON` structure error.
        source: serde_json::Error,
    },

    /// The file extension is not a supported geometry format.
    #[error("Unsupported geometry format for {path:?}")]
    UnsupportedFormat {
        /// File being read.
        path: PathBuf,
    },

    /// The document is a bare geometry rather than features.
    #[error("GeoJSON in {path:?} must be a FeatureCollection")]
    NotFeatureCollection {
        /// File being read.
        path: PathBuf,
    },

    /// A feature has a null geometry.
    #[error("Feature {index} in {path:?} has no geometry")]
    MissingGeometry {
        /// File being read.
        path: PathBuf,
        /// Zero-based feature position.
        index: usize,
    },
}

/// Errors that can occur while preparing the datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A geometry file failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A profile file could not be read.
    #[error("Failed to read profile {path:?}: {source}")]
    ProfileIo {
        /// Profile path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A profile is not valid TOML for the profile schema.
    #[error("Invalid profile: {0}")]
    Profile(#[from] toml::de::Error),

    /// The street filter pattern failed to compile.
    #[error("Invalid street filter: {0}")]
    Pattern(#[from] regex::Error),

    /// A `FeatureCollection` failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
