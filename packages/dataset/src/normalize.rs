//! `GeoJSON` normalization.
//!
//! Turns a [`VectorRecordCollection`] into a strict `FeatureCollection`
//! that serializes without nulls in the declared nullable fields and with
//! every numeric column as a finite float.
//!
//! Two passes are applied per value, in order:
//!
//! 1. Nulls in columns with a declared [`NullDefault`] take that default.
//!    A whole-number default stays an integer in a non-numeric column.
//! 2. Columns that are numeric after pass 1 have any remaining null set
//!    to `0.0`, and every integer is widened to a float.
//!
//! Geometries are written back exactly as they were parsed.
//!
//! [`NullDefault`]: street_lvi_dataset_models::NullDefault

use geojson::{Feature, FeatureCollection, Geometry};
use street_lvi_dataset_models::{
    AttributeValue, DatasetProfile, DefaultValue, VectorRecord, VectorRecordCollection,
};

/// How one column's values are rewritten.
struct ColumnPlan<'a> {
    name: &'a str,
    default: Option<&'a DefaultValue>,
    numeric: bool,
}

/// Builds a `FeatureCollection` from `collection`, one feature per record
/// in record order, filling nulls from `profile`'s declared defaults.
#[must_use]
pub fn normalize(
    collection: &VectorRecordCollection,
    profile: &DatasetProfile,
) -> FeatureCollection {
    let plans = plan_columns(collection, profile);

    let features = collection
        .records
        .iter()
        .map(|record| to_feature(record, &plans))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn plan_columns<'a>(
    collection: &'a VectorRecordCollection,
    profile: &'a DatasetProfile,
) -> Vec<ColumnPlan<'a>> {
    collection
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let default = profile.null_default(&column.name);

            // A default only changes the column type if it actually fills
            // something.
            let has_nulls = collection
                .records
                .iter()
                .any(|r| r.values.get(idx).is_none_or(AttributeValue::is_null));
            let kind = match default {
                Some(default) if has_nulls => column.kind.merge(default.kind()),
                _ => column.kind,
            };

            ColumnPlan {
                name: &column.name,
                default,
                numeric: kind.is_numeric(),
            }
        })
        .collect()
}

fn to_feature(record: &VectorRecord, plans: &[ColumnPlan<'_>]) -> Feature {
    let properties = plans
        .iter()
        .enumerate()
        .map(|(idx, plan)| {
            let value = record.values.get(idx).unwrap_or(&AttributeValue::Null);
            (plan.name.to_string(), normalize_value(value, plan).to_json())
        })
        .collect();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(record.geometry.value.clone())),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn normalize_value(value: &AttributeValue, plan: &ColumnPlan<'_>) -> AttributeValue {
    let filled = match (value, plan.default) {
        (AttributeValue::Null, Some(default)) => default.to_attribute(),
        _ => value.clone(),
    };

    if !plan.numeric {
        return filled;
    }

    match filled {
        AttributeValue::Null => AttributeValue::Float(0.0),
        AttributeValue::Integer(_) | AttributeValue::Float(_) => {
            AttributeValue::Float(filled.as_f64().unwrap_or_default())
        }
        other => other,
    }
}
