//! Reads geometry files into [`VectorRecordCollection`]s.
//!
//! Every feature becomes one record. Property keys across the whole file
//! become the collection's columns (first-seen order), and each column's
//! [`ColumnKind`] is inferred from the non-null values it holds.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geojson::{Feature, GeoJson};
use street_lvi_dataset_models::{
    AttributeValue, Column, ColumnKind, VectorRecord, VectorRecordCollection,
};

use crate::LoadError;

/// Loads a geometry file from disk.
///
/// Only `GeoJSON` (`.geojson` / `.json`) is supported.
///
/// # Errors
///
/// Returns [`LoadError`] if the format is unsupported, the file cannot be
/// read or parsed, or any feature lacks a usable geometry.
pub fn load_collection(path: &Path) -> Result<VectorRecordCollection, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    if !matches!(extension.as_deref(), Some("geojson" | "json")) {
        return Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    log::info!("Loading GeoJSON from {}...", path.display());

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let geojson =
        GeoJson::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let collection = parse_collection(geojson, path)?;

    log::info!(
        "Loaded {} records with {} attribute columns from {}",
        collection.len(),
        collection.columns.len(),
        path.display()
    );
    if let Some(extent) = collection.extent() {
        log::debug!(
            "Extent of {}: ({}, {}) - ({}, {})",
            path.display(),
            extent.min().x,
            extent.min().y,
            extent.max().x,
            extent.max().y
        );
    }

    Ok(collection)
}

/// Builds a collection from an already-parsed `GeoJSON` document.
///
/// `path` is only used to label errors.
///
/// # Errors
///
/// Returns [`LoadError`] if the document is a bare geometry or any
/// feature lacks a usable geometry.
pub fn parse_collection(
    geojson: GeoJson,
    path: &Path,
) -> Result<VectorRecordCollection, LoadError> {
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(LoadError::NotFeatureCollection {
                path: path.to_path_buf(),
            });
        }
    };

    let (mut columns, positions) = collect_columns(&features);
    let mut records = Vec::with_capacity(features.len());

    for (index, feature) in features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            return Err(LoadError::MissingGeometry {
                path: path.to_path_buf(),
                index,
            });
        };

        let mut values = vec![AttributeValue::Null; columns.len()];
        for (key, value) in feature.properties.into_iter().flatten() {
            let Some(&idx) = positions.get(&key) else {
                continue;
            };
            let value = AttributeValue::from(value);
            columns[idx].kind = columns[idx].kind.merge(ColumnKind::of(&value));
            values[idx] = value;
        }

        records.push(VectorRecord { geometry, values });
    }

    Ok(VectorRecordCollection { columns, records })
}

/// Gathers the union of property keys in first-seen order.
fn collect_columns(features: &[Feature]) -> (Vec<Column>, BTreeMap<String, usize>) {
    let mut columns = Vec::new();
    let mut positions = BTreeMap::new();

    for props in features.iter().filter_map(|f| f.properties.as_ref()) {
        for key in props.keys() {
            if !positions.contains_key(key) {
                positions.insert(key.clone(), columns.len());
                columns.push(Column {
                    name: key.clone(),
                    kind: ColumnKind::Empty,
                });
            }
        }
    }

    (columns, positions)
}
