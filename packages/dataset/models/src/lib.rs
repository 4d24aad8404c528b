#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory vector record types for the street LVI datasets.
//!
//! A [`VectorRecordCollection`] is a small table: an ordered list of
//! [`Column`]s and an ordered list of [`VectorRecord`]s whose attribute
//! values line up with those columns. Both the street segments and the
//! municipal boundaries are held in this shape between loading and
//! `GeoJSON` normalization.

pub mod profile;

use geo::{BoundingRect, Coord, Rect};

pub use profile::{DatasetProfile, DatasetSource, DefaultValue, NullDefault, StreetFilterConfig};

/// A single attribute value read from a feature's properties.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Missing or explicit `null`.
    Null,
    /// Integral number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Text value.
    String(String),
    /// Boolean value.
    Boolean(bool),
    /// Nested arrays or objects, carried through untouched.
    Other(serde_json::Value),
}

impl AttributeValue {
    /// Returns `true` for [`AttributeValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a float if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Converts the value into JSON for a `GeoJSON` properties object.
    ///
    /// Non-finite floats have no JSON representation and become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, Into::into)
            }
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Other(v) => v.clone(),
        }
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Other(serde_json::Value::Number(n))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Other(other)
            }
        }
    }
}

/// The type of a column, inferred from every non-null value it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// No non-null value seen.
    Empty,
    /// Only integers.
    Integer,
    /// Floats, or a mix of integers and floats.
    Float,
    /// Only booleans.
    Boolean,
    /// Only strings.
    String,
    /// Incompatible value types, or nested values.
    Mixed,
}

impl ColumnKind {
    /// The kind contributed by a single value.
    #[must_use]
    pub const fn of(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => Self::Empty,
            AttributeValue::Integer(_) => Self::Integer,
            AttributeValue::Float(_) => Self::Float,
            AttributeValue::Boolean(_) => Self::Boolean,
            AttributeValue::String(_) => Self::String,
            AttributeValue::Other(_) => Self::Mixed,
        }
    }

    /// Combines two kinds observed in the same column.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, k) | (k, Self::Empty) => k,
            (Self::Integer, Self::Integer) => Self::Integer,
            (Self::Integer | Self::Float, Self::Integer | Self::Float) => Self::Float,
            (Self::Boolean, Self::Boolean) => Self::Boolean,
            (Self::String, Self::String) => Self::String,
            _ => Self::Mixed,
        }
    }

    /// Integer and float columns are numeric.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// A named attribute column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Property name as it appears in the source file.
    pub name: String,
    /// Inferred value type.
    pub kind: ColumnKind,
}

/// One feature: a geometry plus attribute values aligned with the
/// owning collection's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    /// Geometry exactly as parsed, including any Z values.
    pub geometry: geojson::Geometry,
    /// One value per column, in column order.
    pub values: Vec<AttributeValue>,
}

/// An ordered table of geometry records with named attribute columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorRecordCollection {
    /// Attribute columns in first-seen order.
    pub columns: Vec<Column>,
    /// Records in source order.
    pub records: Vec<VectorRecord>,
}

impl VectorRecordCollection {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the column called `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// A collection with the same columns and the given records.
    #[must_use]
    pub fn with_records(&self, records: Vec<VectorRecord>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    /// Bounding rectangle covering every record's geometry, in two
    /// dimensions.
    #[must_use]
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.records
            .iter()
            .filter_map(|r| geo::Geometry::<f64>::try_from(&r.geometry).ok())
            .filter_map(|g| g.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, Point, line_string};

    fn geometry(shape: &Geometry<f64>) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::from(shape))
    }

    #[test]
    fn converts_json_numbers() {
        assert_eq!(
            AttributeValue::from(serde_json::json!(3)),
            AttributeValue::Integer(3)
        );
        assert_eq!(
            AttributeValue::from(serde_json::json!(0.25)),
            AttributeValue::Float(0.25)
        );
        assert_eq!(
            AttributeValue::from(serde_json::json!(u64::MAX)),
            AttributeValue::Float(1.844_674_407_370_955_2e19)
        );
    }

    #[test]
    fn converts_nested_json_to_other() {
        let value = serde_json::json!({ "a": [1, 2] });
        assert_eq!(
            AttributeValue::from(value.clone()),
            AttributeValue::Other(value)
        );
    }

    #[test]
    fn non_finite_float_serializes_as_null() {
        assert_eq!(
            AttributeValue::Float(f64::NAN).to_json(),
            serde_json::Value::Null
        );
        assert_eq!(
            AttributeValue::Float(1.5).to_json(),
            serde_json::json!(1.5)
        );
    }

    #[test]
    fn merges_column_kinds() {
        assert_eq!(
            ColumnKind::Empty.merge(ColumnKind::Integer),
            ColumnKind::Integer
        );
        assert_eq!(
            ColumnKind::Integer.merge(ColumnKind::Float),
            ColumnKind::Float
        );
        assert_eq!(
            ColumnKind::Float.merge(ColumnKind::Integer),
            ColumnKind::Float
        );
        assert_eq!(
            ColumnKind::String.merge(ColumnKind::Integer),
            ColumnKind::Mixed
        );
        assert_eq!(
            ColumnKind::Boolean.merge(ColumnKind::Empty),
            ColumnKind::Boolean
        );
        assert!(ColumnKind::Integer.is_numeric());
        assert!(!ColumnKind::Empty.is_numeric());
        assert!(!ColumnKind::Mixed.is_numeric());
    }

    #[test]
    fn computes_extent_across_records() {
        let collection = VectorRecordCollection {
            columns: vec![],
            records: vec![
                VectorRecord {
                    geometry: geometry(&Geometry::Point(Point::new(-87.7, 41.8))),
                    values: vec![],
                },
                VectorRecord {
                    geometry: geometry(&Geometry::LineString(line_string![
                        (x: -87.65, y: 41.85),
                        (x: -87.6, y: 41.9),
                    ])),
                    values: vec![],
                },
            ],
        };

        let extent = collection.extent().unwrap();
        assert!((extent.min().x - -87.7).abs() < f64::EPSILON);
        assert!((extent.min().y - 41.8).abs() < f64::EPSILON);
        assert!((extent.max().x - -87.6).abs() < f64::EPSILON);
        assert!((extent.max().y - 41.9).abs() < f64::EPSILON);
        assert!(VectorRecordCollection::default().extent().is_none());
    }

    #[test]
    fn extent_ignores_z_values() {
        let collection = VectorRecordCollection {
            columns: vec![],
            records: vec![VectorRecord {
                geometry: geojson::Geometry::new(geojson::Value::LineString(vec![
                    vec![-87.6, 41.8, 180.0],
                    vec![-87.5, 41.9, 181.0],
                ])),
                values: vec![],
            }],
        };

        let extent = collection.extent().unwrap();
        assert!((extent.min().x - -87.6).abs() < f64::EPSILON);
        assert!((extent.max().y - 41.9).abs() < f64::EPSILON);
    }

    #[test]
    fn finds_columns_by_name() {
        let collection = VectorRecordCollection {
            columns: vec![
                Column {
                    name: "cleaned_block".to_string(),
                    kind: ColumnKind::String,
                },
                Column {
                    name: "LVI".to_string(),
                    kind: ColumnKind::Float,
                },
            ],
            records: vec![VectorRecord {
                geometry: geometry(&Geometry::Point(Point::new(0.0, 0.0))),
                values: vec![
                    AttributeValue::String("W Taylor St".to_string()),
                    AttributeValue::Float(0.4),
                ],
            }],
        };
        assert_eq!(collection.column_index("cleaned_block"), Some(0));
        assert_eq!(collection.column_index("LVI"), Some(1));
        assert_eq!(collection.column_index("missing"), None);
    }
}
