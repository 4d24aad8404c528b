//! Street-name substring filter.
//!
//! Keeps street records whose block name contains any configured
//! street-name fragment, ignoring case. The fragments are matched as
//! literal text anywhere in the value, never as whole words.

use regex::{Regex, RegexBuilder};
use street_lvi_dataset_models::{AttributeValue, StreetFilterConfig, VectorRecordCollection};

/// A compiled case-insensitive substring filter over one attribute.
#[derive(Debug, Clone)]
pub struct StreetFilter {
    field: String,
    /// `None` when there are no fragments, which matches nothing.
    pattern: Option<Regex>,
}

impl StreetFilter {
    /// Compiles `substrings` into a single case-insensitive alternation.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the combined pattern exceeds the regex
    /// size limits.
    pub fn new<S: AsRef<str>>(field: &str, substrings: &[S]) -> Result<Self, regex::Error> {
        let pattern = if substrings.is_empty() {
            None
        } else {
            let alternation = substrings
                .iter()
                .map(|s| regex::escape(s.as_ref()))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self {
            field: field.to_string(),
            pattern,
        })
    }

    /// Builds the filter described by a profile.
    ///
    /// # Errors
    ///
    /// See [`StreetFilter::new`].
    pub fn from_config(config: &StreetFilterConfig) -> Result<Self, regex::Error> {
        Self::new(&config.field, config.substrings.as_slice())
    }

    /// Returns `true` if `value` contains any of the fragments.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(value))
    }

    /// Returns the matching records, in order, with the same columns.
    ///
    /// Records whose field is null or not a string never match.
    #[must_use]
    pub fn apply(&self, collection: &VectorRecordCollection) -> VectorRecordCollection {
        let Some(idx) = collection.column_index(&self.field) else {
            log::warn!(
                "Filter field '{}' not present; no records selected",
                self.field
            );
            return collection.with_records(Vec::new());
        };

        let records = collection
            .records
            .iter()
            .filter(|record| {
                record
                    .values
                    .get(idx)
                    .and_then(AttributeValue::as_str)
                    .is_some_and(|s| self.matches(s))
            })
            .cloned()
            .collect();

        let filtered = collection.with_records(records);
        log::info!(
            "Street filter on '{}' kept {} of {} records",
            self.field,
            filtered.len(),
            collection.len()
        );
        filtered
    }
}
