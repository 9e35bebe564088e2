//! Canonical serialization and atomic writes for locale files.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::file::LocaleError;

/// Serializes a tree in canonical form: two-space indentation, keys in
/// lexicographic order, one trailing newline.
///
/// # Errors
/// Fails only when the tree cannot be serialized, which a parsed locale
/// tree never triggers in practice.
pub fn to_canonical_json(tree: &Value) -> Result<String, LocaleError> {
    let mut text = serde_json::to_string_pretty(tree).map_err(LocaleError::Serialize)?;
    text.push('\n');
    Ok(text)
}

/// Writes `text` to `path` through a sibling temp file and a rename, so an
/// interrupted run never leaves a half-written locale file behind.
///
/// # Errors
/// Fails when the temp file cannot be written or the rename fails.
pub fn write_atomic(path: &Path, text: &str) -> Result<(), LocaleError> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, text)
        .map_err(|source| LocaleError::Write { path: temp_path.clone(), source })?;
    fs::rename(&temp_path, path)
        .map_err(|source| LocaleError::Write { path: path.to_path_buf(), source })?;
    Ok(())
}
