//! Reference/target comparison of translation trees.

use std::collections::BTreeSet;

use serde_json::Value;

use super::flatten::{
    flatten_tree,
    lookup_path,
    walk_leaves,
};
use super::plural::is_plural_sibling;

/// Knobs for [`compare`].
#[derive(Debug, Clone)]
pub struct DiffOptions<'a> {
    /// Separator used when joining leaf paths for display and matching.
    pub separator: &'a str,
    /// Keys (or whole subtrees) allowed to match the reference verbatim.
    pub ignore_identical: &'a [String],
    /// Exempt plural variants the reference language does not need.
    pub plural_aware: bool,
}

impl Default for DiffOptions<'static> {
    fn default() -> Self {
        Self {
            separator: ".",
            ignore_identical: &[],
            plural_aware: true,
        }
    }
}

/// Outcome of comparing one target tree against the reference tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// Reference leaves the target lacks entirely.
    pub missing: Vec<String>,
    /// Target leaves still byte-for-byte equal to the reference value.
    pub identical: Vec<String>,
    /// Target leaves with no counterpart in the reference.
    pub orphans: Vec<String>,
    /// Reference leaves carrying a distinct target value.
    pub translated: usize,
    /// Identical leaves exempted by the ignore list.
    pub ignored: usize,
}

impl DiffReport {
    /// Leaves still needing translation work: missing plus identical.
    #[must_use]
    pub fn untranslated(&self) -> usize {
        self.missing.len() + self.identical.len()
    }

    /// Total findings the report carries.
    #[must_use]
    pub fn findings(&self) -> usize {
        self.untranslated() + self.orphans.len()
    }

    /// True when the target needs no work at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings() == 0
    }
}

/// Counts reference leaves that are untranslated in the target: leaves the
/// target lacks, plus leaves whose target value equals the reference value.
///
/// The walk follows the reference only, so extra target keys never affect
/// the count.
#[must_use]
pub fn count_untranslated(reference: &Value, target: &Value) -> usize {
    let mut count = 0;
    walk_leaves(reference, |path, value| {
        match lookup_path(target, path) {
            None => count += 1,
            Some(found) if found == value => count += 1,
            Some(_) => {}
        }
    });
    count
}

/// Compares `target` against `reference` and reports missing, identical,
/// and orphan leaves.
#[must_use]
pub fn compare(reference: &Value, target: &Value, options: &DiffOptions<'_>) -> DiffReport {
    let mut report = DiffReport::default();

    walk_leaves(reference, |path, value| {
        let joined = path.join(options.separator);
        match lookup_path(target, path) {
            None => report.missing.push(joined),
            Some(found) if found == value => {
                if is_ignored(&joined, options.ignore_identical, options.separator) {
                    report.ignored += 1;
                } else {
                    report.identical.push(joined);
                }
            }
            Some(_) => report.translated += 1,
        }
    });

    let reference_paths: BTreeSet<String> =
        flatten_tree(reference, options.separator).into_keys().collect();
    for path in flatten_tree(target, options.separator).into_keys() {
        if reference_paths.contains(&path) {
            continue;
        }
        if options.plural_aware && is_plural_sibling(&path, &reference_paths) {
            continue;
        }
        report.orphans.push(path);
    }

    report
}

/// True when `path` equals an ignore entry or sits inside an ignored subtree.
fn is_ignored(path: &str, ignore_list: &[String], separator: &str) -> bool {
    ignore_list.iter().any(|entry| {
        path.strip_prefix(entry.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(separator))
    })
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn counts_missing_and_identical_leaves() {
        let reference = json!({
            "common": {"ok": "OK", "cancel": "Cancel"},
            "title": "Dashboard"
        });
        let target = json!({
            "common": {"ok": "OK"},
            "title": "Tableau de bord"
        });

        // "cancel" is missing, "ok" is identical
        expect_that!(count_untranslated(&reference, &target), eq(2));
    }

    #[googletest::test]
    fn extra_target_keys_do_not_affect_the_count() {
        let reference = json!({"a": "1"});
        let target = json!({"a": "un", "legacy": {"b": "2"}});

        expect_that!(count_untranslated(&reference, &target), eq(0));
    }

    #[googletest::test]
    fn empty_target_counts_every_reference_leaf() {
        let reference = json!({"a": "1", "b": {"c": "2", "d": "3"}});

        expect_that!(count_untranslated(&reference, &json!({})), eq(3));
    }

    #[googletest::test]
    fn fully_translated_target_counts_zero() {
        let reference = json!({"a": "One", "b": {"c": "Two"}});
        let target = json!({"a": "Un", "b": {"c": "Deux"}});

        expect_that!(count_untranslated(&reference, &target), eq(0));
    }

    #[googletest::test]
    fn compare_splits_missing_identical_and_orphans() {
        let reference = json!({
            "common": {"ok": "OK", "cancel": "Cancel"},
            "title": "Dashboard"
        });
        let target = json!({
            "common": {"ok": "OK"},
            "title": "Tableau de bord",
            "legacy": {"old": "Vieux"}
        });

        let report = compare(&reference, &target, &DiffOptions::default());

        expect_that!(report.missing, eq(&vec!["common.cancel".to_string()]));
        expect_that!(report.identical, eq(&vec!["common.ok".to_string()]));
        expect_that!(report.orphans, eq(&vec!["legacy.old".to_string()]));
        expect_that!(report.translated, eq(1));
        expect_that!(report.untranslated(), eq(2));
        expect_that!(report.findings(), eq(3));
    }

    #[rstest]
    #[case::exact_key("common.ok")]
    #[case::whole_subtree("common")]
    fn ignore_list_exempts_identical_leaves(#[case] entry: &str) {
        let reference = json!({"common": {"ok": "OK"}});
        let target = json!({"common": {"ok": "OK"}});
        let ignore = vec![entry.to_string()];
        let options = DiffOptions {
            ignore_identical: &ignore,
            ..DiffOptions::default()
        };

        let report = compare(&reference, &target, &options);

        assert!(report.identical.is_empty());
        assert_eq!(report.ignored, 1);
        assert!(report.is_clean());
    }

    #[googletest::test]
    fn ignore_entry_does_not_match_key_prefixes() {
        // "common" must not exempt "commonExtra"
        let reference = json!({"commonExtra": "Same"});
        let target = json!({"commonExtra": "Same"});
        let ignore = vec!["common".to_string()];
        let options = DiffOptions {
            ignore_identical: &ignore,
            ..DiffOptions::default()
        };

        let report = compare(&reference, &target, &options);

        expect_that!(report.identical, eq(&vec!["commonExtra".to_string()]));
    }

    #[googletest::test]
    fn plural_variants_of_reference_keys_are_not_orphans() {
        let reference = json!({"items_one": "{{count}} item", "items_other": "{{count}} items"});
        let target = json!({
            "items_one": "{{count}} предмет",
            "items_few": "{{count}} предмета",
            "items_many": "{{count}} предметов",
            "items_other": "{{count}} предмета"
        });

        let report = compare(&reference, &target, &DiffOptions::default());

        expect_that!(report.orphans.is_empty(), eq(true));
        expect_that!(report.translated, eq(2));
    }

    #[googletest::test]
    fn plural_exemption_can_be_disabled() {
        let reference = json!({"items_one": "{{count}} item"});
        let target = json!({"items_one": "{{count}} предмет", "items_few": "{{count}} предмета"});
        let options = DiffOptions {
            plural_aware: false,
            ..DiffOptions::default()
        };

        let report = compare(&reference, &target, &options);

        expect_that!(report.orphans, eq(&vec!["items_few".to_string()]));
    }

    #[googletest::test]
    fn type_mismatch_counts_as_translated_not_identical() {
        // reference leaf vs target subtree: values differ, so the target side
        // shows up through the orphan list instead
        let reference = json!({"a": "leaf"});
        let target = json!({"a": {"b": "1"}});

        let report = compare(&reference, &target, &DiffOptions::default());

        expect_that!(report.missing.is_empty(), eq(true));
        expect_that!(report.identical.is_empty(), eq(true));
        expect_that!(report.translated, eq(1));
        expect_that!(report.orphans, eq(&vec!["a.b".to_string()]));
    }

    #[googletest::test]
    fn separator_applies_to_reported_paths() {
        let reference = json!({"a": {"b": "1"}});
        let options = DiffOptions {
            separator: "/",
            ..DiffOptions::default()
        };

        let report = compare(&reference, &json!({}), &options);

        expect_that!(report.missing, eq(&vec!["a/b".to_string()]));
    }
}
