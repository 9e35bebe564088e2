//! Translation tree primitives: merge, leaf enumeration, and comparison.

/// Reference/target comparison
mod diff;
/// Leaf enumeration and path handling
mod flatten;
/// Recursive tree merge
mod merge;
/// i18next plural suffix handling
mod plural;

pub use diff::{
    DiffOptions,
    DiffReport,
    compare,
    count_untranslated,
};
pub use flatten::{
    flatten_tree,
    insert_leaf,
    lookup_path,
    walk_leaves,
};
pub use merge::{
    MergeStats,
    changed_leaves,
    deep_merge,
    deep_merge_with_stats,
};
pub use plural::{
    PLURAL_SUFFIXES,
    is_plural_sibling,
    plural_base,
};
