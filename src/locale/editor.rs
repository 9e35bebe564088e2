//! Format-preserving edits to locale file text.
//!
//! Edits go through the jsonc-parser CST so untouched keys keep their
//! indentation, ordering, and comments.

use jsonc_parser::ParseOptions;
use jsonc_parser::cst::{
    CstInputValue,
    CstObject,
    CstRootNode,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("failed to parse locale file as JSON: {0}")]
    Parse(String),

    #[error("locale file root is not a JSON object")]
    NotAnObject,
}

/// Result of deleting keys from a locale file.
#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    pub new_text: String,
    /// Keys that were actually present and removed, deepest first.
    pub deleted: Vec<String>,
}

/// Writes every leaf of `patch` into the JSON text, creating intermediate
/// objects as needed. Existing values are overwritten in place; everything
/// else keeps its original formatting.
///
/// Pre-filter the patch with [`crate::tree::changed_leaves`] to avoid
/// rewriting value tokens that would not change.
///
/// # Errors
/// Fails when the text is not parseable JSON.
pub fn apply_patch_to_text(
    json_text: &str,
    patch: &Map<String, Value>,
) -> Result<String, EditError> {
    let root = CstRootNode::parse(json_text, &ParseOptions::default())
        .map_err(|e| EditError::Parse(e.to_string()))?;
    let root_obj = root.object_value_or_set();

    apply_to_object(&root_obj, patch);

    Ok(root.to_string())
}

fn apply_to_object(obj: &CstObject, patch: &Map<String, Value>) {
    for (key, patch_value) in patch {
        if let Value::Object(patch_child) = patch_value {
            let child_obj = obj.object_value_or_set(key);
            apply_to_object(&child_obj, patch_child);
        } else {
            upsert_leaf(obj, key, patch_value);
        }
    }
}

/// Replaces the value of an existing property or appends a new one.
fn upsert_leaf(obj: &CstObject, key: &str, value: &Value) {
    let input = to_input_value(value);
    if let Some(prop) = obj.get(key) {
        prop.set_value(input);
    } else {
        obj.append(key, input);
    }
}

fn to_input_value(value: &Value) -> CstInputValue {
    match value {
        Value::Null => CstInputValue::Null,
        Value::Bool(b) => CstInputValue::Bool(*b),
        Value::Number(n) => CstInputValue::Number(n.to_string()),
        Value::String(s) => CstInputValue::String(s.clone()),
        Value::Array(items) => {
            CstInputValue::Array(items.iter().map(to_input_value).collect())
        }
        Value::Object(map) => CstInputValue::Object(
            map.iter().map(|(k, v)| (k.clone(), to_input_value(v))).collect(),
        ),
    }
}

/// Deletes the given joined keys from the JSON text, then removes parent
/// objects left empty. Keys that do not resolve to a property are skipped.
///
/// # Errors
/// Fails when the text is not parseable JSON or its root is not an object.
pub fn delete_keys_from_text(
    json_text: &str,
    keys: &[String],
    separator: &str,
) -> Result<DeletionOutcome, EditError> {
    let root = CstRootNode::parse(json_text, &ParseOptions::default())
        .map_err(|e| EditError::Parse(e.to_string()))?;
    let root_obj = root.object_value().ok_or(EditError::NotAnObject)?;

    // Deepest first so leaves go before their parents
    let mut sorted_keys = keys.to_vec();
    sorted_keys.sort_by_key(|key| std::cmp::Reverse(key.matches(separator).count()));

    let mut deleted = Vec::new();
    for key in &sorted_keys {
        if delete_single_key(&root_obj, key, separator) {
            deleted.push(key.clone());
        }
    }

    prune_empty_objects(&root_obj);

    Ok(DeletionOutcome { new_text: root.to_string(), deleted })
}

fn delete_single_key(root_obj: &CstObject, key: &str, separator: &str) -> bool {
    let parts: Vec<&str> = key.split(separator).collect();

    let mut current_obj = root_obj.clone();
    for (i, part) in parts.iter().enumerate() {
        if i == parts.len() - 1 {
            if let Some(prop) = current_obj.get(part) {
                prop.remove();
                return true;
            }
            return false;
        }
        match current_obj.object_value(part) {
            Some(child) => current_obj = child,
            None => return false,
        }
    }
    false
}

/// Removes properties whose object value ended up empty, bottom-up.
fn prune_empty_objects(obj: &CstObject) {
    for prop in obj.properties() {
        if let Some(child_obj) = prop.value().and_then(|v| v.as_object()) {
            prune_empty_objects(&child_obj);

            if child_obj.properties().is_empty() {
                prop.remove();
            }
        }
    }
}
