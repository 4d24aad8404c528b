#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the street LVI server.
//!
//! The dataset endpoints return `GeoJSON` directly; these types cover
//! the service's own status responses.

use geo::Rect;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Filtered street segments being served.
    pub streets: ApiDatasetSummary,
    /// Municipal boundaries being served.
    pub boundaries: ApiDatasetSummary,
}

/// Size and extent of one served `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDatasetSummary {
    /// Number of features.
    pub feature_count: usize,
    /// Bounding box as `[west, south, east, north]`, absent when empty.
    pub bbox: Option<[f64; 4]>,
}

impl ApiDatasetSummary {
    /// Builds a summary from a feature count and optional extent.
    #[must_use]
    pub fn new(feature_count: usize, extent: Option<Rect<f64>>) -> Self {
        Self {
            feature_count,
            bbox: extent.map(|r| [r.min().x, r.min().y, r.max().x, r.max().y]),
        }
    }
}
