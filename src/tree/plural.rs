//! i18next plural suffix handling.
//!
//! Plural forms differ per language, so a target locale may legitimately
//! carry suffixed keys the reference language never uses (Russian needs
//! `_few` and `_many`, English only `_one` and `_other`).

use std::collections::BTreeSet;

/// Longer suffixes must come first so `_one` cannot match `rank_ordinal_one`.
pub const PLURAL_SUFFIXES: &[&str] = &[
    "_ordinal_zero",
    "_ordinal_one",
    "_ordinal_two",
    "_ordinal_few",
    "_ordinal_many",
    "_ordinal_other",
    "_zero",
    "_one",
    "_two",
    "_few",
    "_many",
    "_other",
];

/// Strips a plural suffix from a leaf path, returning the base path.
///
/// Returns `None` when the path carries no plural suffix or nothing would
/// remain after stripping it.
#[must_use]
pub fn plural_base(path: &str) -> Option<&str> {
    for suffix in PLURAL_SUFFIXES {
        if let Some(base) = path.strip_suffix(suffix)
            && !base.is_empty()
        {
            return Some(base);
        }
    }
    None
}

/// Returns true if `path` is a plural form of a key the reference knows,
/// either as a bare base key or through any other plural variant.
#[must_use]
pub fn is_plural_sibling(path: &str, reference_paths: &BTreeSet<String>) -> bool {
    let Some(base) = plural_base(path) else {
        return false;
    };
    if reference_paths.contains(base) {
        return true;
    }
    PLURAL_SUFFIXES
        .iter()
        .any(|suffix| reference_paths.contains(&format!("{base}{suffix}")))
}
