//! Recursive merging of translation trees.

use serde_json::{
    Map,
    Value,
};

use super::flatten::{
    insert_leaf,
    lookup_path,
    walk_leaves,
};

/// Leaf-level outcome counts for a single merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    /// Leaves written to paths the base tree did not have.
    pub added: usize,
    /// Leaves that replaced a different base value.
    pub updated: usize,
    /// Leaves whose base value already matched the patch.
    pub unchanged: usize,
}

impl MergeStats {
    /// Number of leaves the merge actually changed.
    #[must_use]
    pub const fn changed(&self) -> usize {
        self.added + self.updated
    }
}

/// Merges `patch` into `base` and returns the combined tree.
///
/// Objects are merged key by key, recursively. Every other patch value
/// (strings, numbers, booleans, arrays, null) overwrites whatever the base
/// holds at the same path. Keys present only in the base are carried through
/// untouched. Neither input is mutated.
///
/// # Examples
/// - base `{"a": {"b": 1, "c": 2}}`, patch `{"a": {"c": 3}}` → `{"a": {"b": 1, "c": 3}}`
/// - base `{"a": 1}`, patch `{"a": {"b": 2}}` → `{"a": {"b": 2}}`
/// - base `{"items": [1, 2]}`, patch `{"items": [3]}` → `{"items": [3]}`
#[must_use]
pub fn deep_merge(base: &Value, patch: &Value) -> Value {
    deep_merge_with_stats(base, patch).0
}

/// Same as [`deep_merge`], but also reports how many leaves were added,
/// updated, or already up to date.
#[must_use]
pub fn deep_merge_with_stats(base: &Value, patch: &Value) -> (Value, MergeStats) {
    let mut stats = MergeStats::default();
    let merged = if let Value::Object(patch_map) = patch {
        Value::Object(merge_object(base.as_object(), patch_map, &mut stats))
    } else {
        take_leaf(Some(base), patch, &mut stats)
    };
    (merged, stats)
}

/// Merges one object level. A missing base object behaves like an empty one.
fn merge_object(
    base: Option<&Map<String, Value>>,
    patch: &Map<String, Value>,
    stats: &mut MergeStats,
) -> Map<String, Value> {
    let mut merged = base.cloned().unwrap_or_default();
    for (key, patch_value) in patch {
        let value = if let Value::Object(patch_child) = patch_value {
            let base_child = merged.get(key).and_then(Value::as_object);
            Value::Object(merge_object(base_child, patch_child, stats))
        } else {
            take_leaf(merged.get(key), patch_value, stats)
        };
        merged.insert(key.clone(), value);
    }
    merged
}

/// Returns the subset of `patch` whose leaves would actually change `base`:
/// leaves the base lacks or holds with a different value.
///
/// Feeding this subset to the format-preserving editor keeps value tokens
/// that would not change out of the rewrite.
#[must_use]
pub fn changed_leaves(base: &Value, patch: &Value) -> Map<String, Value> {
    let mut subset = Map::new();
    walk_leaves(patch, |path, value| {
        if lookup_path(base, path) != Some(value) {
            insert_leaf(&mut subset, path, value.clone());
        }
    });
    subset
}

/// Clones a leaf patch value, recording whether it adds, updates, or matches
/// the base value at the same path.
fn take_leaf(existing: Option<&Value>, patch_value: &Value, stats: &mut MergeStats) -> Value {
    match existing {
        None => stats.added += 1,
        Some(value) if value == patch_value => stats.unchanged += 1,
        Some(_) => stats.updated += 1,
    }
    patch_value.clone()
}
