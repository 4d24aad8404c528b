//! Dataset profile registry.
//!
//! The built-in Chicago profile is embedded at compile time via
//! `include_str!`. A replacement profile can be read from disk with
//! [`load_from_file`].

use std::path::Path;

use street_lvi_dataset_models::DatasetProfile;

use crate::DatasetError;

/// Embedded TOML for the built-in profile.
const BUILTIN_PROFILE: &str = include_str!("../profiles/chicago.toml");

/// Returns the built-in Chicago street LVI profile.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. It is a compile-time
/// constant, so a failure is a development error caught by the tests.
#[must_use]
pub fn builtin() -> DatasetProfile {
    parse(BUILTIN_PROFILE)
        .unwrap_or_else(|e| panic!("Failed to parse built-in dataset profile: {e}"))
}

/// Parses a profile from TOML text.
///
/// # Errors
///
/// Returns [`DatasetError::Profile`] if the TOML does not match the
/// profile schema.
pub fn parse(toml_str: &str) -> Result<DatasetProfile, DatasetError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Reads and parses a profile file.
///
/// # Errors
///
/// Returns [`DatasetError::ProfileIo`] if the file cannot be read, or
/// [`DatasetError::Profile`] if it is not a valid profile.
pub fn load_from_file(path: &Path) -> Result<DatasetProfile, DatasetError> {
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::ProfileIo {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded dataset profile from {}", path.display());
    parse(&content)
}
