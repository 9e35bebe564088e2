//! Leaf enumeration over translation trees.
//!
//! A leaf is any value that is not a JSON object. Arrays count as single
//! leaves, matching how the merge treats them.

use std::collections::BTreeMap;

use serde_json::{
    Map,
    Value,
};

/// Visits every leaf of `tree` in key order, passing the path segments from
/// the root and the leaf value.
///
/// A non-object root has no leaves. Empty objects contribute nothing.
pub fn walk_leaves<'a>(tree: &'a Value, mut visit: impl FnMut(&[&'a str], &'a Value)) {
    if let Value::Object(map) = tree {
        let mut path = Vec::new();
        walk_object(map, &mut path, &mut visit);
    }
}

fn walk_object<'a>(
    map: &'a Map<String, Value>,
    path: &mut Vec<&'a str>,
    visit: &mut impl FnMut(&[&'a str], &'a Value),
) {
    for (key, value) in map {
        path.push(key.as_str());
        if let Value::Object(child) = value {
            walk_object(child, path, visit);
        } else {
            visit(path, value);
        }
        path.pop();
    }
}

/// Flattens a tree into a map from joined leaf path to leaf value.
///
/// # Examples
/// - `{"a": {"b": "x"}}` with separator `"."` → `{"a.b": "x"}`
/// - `{"items": ["x", "y"]}` → `{"items": ["x", "y"]}` (arrays stay whole)
#[must_use]
pub fn flatten_tree<'a>(tree: &'a Value, separator: &str) -> BTreeMap<String, &'a Value> {
    let mut leaves = BTreeMap::new();
    walk_leaves(tree, |path, value| {
        leaves.insert(path.join(separator), value);
    });
    leaves
}

/// Resolves a segment path inside a tree.
#[must_use]
pub fn lookup_path<'a>(tree: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = tree;
    for part in segments {
        current = current.as_object()?.get(*part)?;
    }
    Some(current)
}

/// Inserts a leaf value at the given segment path, creating intermediate
/// objects as needed. A non-object intermediate value is replaced.
pub fn insert_leaf(tree: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        tree.insert((*first).to_string(), value);
        return;
    }
    let entry = tree
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_leaf(child, rest, value);
    }
}
