//! `apply` subcommand: merges patch documents into locale files.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde_json::Value;

use crate::cli::ApplyArgs;
use crate::commands::{
    CommandError,
    Workspace,
    scan_tree_suspects,
};
use crate::locale::{
    LocaleFile,
    apply_patch_to_text,
    normalize_language_code,
    to_canonical_json,
    write_atomic,
};
use crate::patch::PatchDocument;
use crate::tree::{
    MergeStats,
    changed_leaves,
    deep_merge,
    deep_merge_with_stats,
};
use crate::validate::SuspectValue;

/// Runs the `apply` subcommand.
///
/// Patch documents are loaded and validated up front, so a bad batch
/// leaves every locale file untouched. Writes happen per file and each
/// write is atomic.
///
/// # Errors
/// Fails on workspace or patch loading errors, when a batch names an
/// unknown language, and when suspect values are found without
/// `--allow-suspect`.
pub fn run(args: &ApplyArgs, root: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let workspace = Workspace::load(root)?;
    let document = PatchDocument::load_all(&args.patches, args.language.as_deref())?;
    if document.is_empty() {
        writeln!(out, "nothing to apply")?;
        return Ok(());
    }

    if !args.allow_suspect {
        let suspects = collect_suspects(&document, &workspace);
        if !suspects.is_empty() {
            return Err(CommandError::SuspectValues { suspects });
        }
    }

    // 全バッチの言語を先に解決してから書き込みに入る。pt-BR と pt_BR の
    // ように同じファイルへ向かうバッチは一つに畳む。
    let mut jobs: BTreeMap<String, (String, Value, &LocaleFile)> = BTreeMap::new();
    for (language, batch) in document.iter() {
        let file = workspace.find_file(language).ok_or_else(|| CommandError::UnknownLanguage {
            language: language.to_string(),
            known: workspace.known_languages(),
        })?;
        let key = normalize_language_code(language);
        if let Some(job) = jobs.get_mut(&key) {
            job.1 = deep_merge(&job.1, batch);
        } else {
            jobs.insert(key, (language.to_string(), batch.clone(), file));
        }
    }

    let mut total = MergeStats::default();
    let mut files_written = 0_usize;
    for (language, batch, file) in jobs.into_values() {
        let stats = apply_batch(args, &workspace, &language, &batch, file, out)?;
        if stats.changed() > 0 && !args.dry_run {
            files_written += 1;
        }
        total.added += stats.added;
        total.updated += stats.updated;
        total.unchanged += stats.unchanged;
    }

    if args.dry_run {
        writeln!(
            out,
            "dry run: would add {} and update {} key(s)",
            total.added, total.updated
        )?;
    } else {
        writeln!(
            out,
            "added {} and updated {} key(s) in {} file(s)",
            total.added, total.updated, files_written
        )?;
    }
    Ok(())
}

fn apply_batch(
    args: &ApplyArgs,
    workspace: &Workspace,
    language: &str,
    batch: &Value,
    file: &LocaleFile,
    out: &mut impl Write,
) -> Result<MergeStats, CommandError> {
    let (merged, stats) = deep_merge_with_stats(file.tree(), batch);

    if args.dry_run {
        writeln!(
            out,
            "{}: would add {}, update {} ({} already current)",
            language, stats.added, stats.updated, stats.unchanged
        )?;
        return Ok(stats);
    }

    if stats.changed() == 0 {
        writeln!(out, "{language}: already up to date")?;
        return Ok(stats);
    }

    if args.reformat {
        write_atomic(file.path(), &to_canonical_json(&merged)?)?;
    } else {
        // 変更される葉だけを CST に流し、既存の書式とエスケープを保つ
        let effective = changed_leaves(file.tree(), batch);
        let new_text = apply_patch_to_text(file.text(), &effective)?;
        write_atomic(file.path(), &new_text)?;
    }

    writeln!(
        out,
        "{}: added {}, updated {} -> {}",
        language,
        stats.added,
        stats.updated,
        workspace.display_path(file)
    )?;
    Ok(stats)
}

/// Validates every batch leaf against the reference tree. Batches for the
/// reference language itself skip the placeholder parity check, since they
/// are allowed to change the placeholders.
fn collect_suspects(document: &PatchDocument, workspace: &Workspace) -> Vec<SuspectValue> {
    let reference_key = normalize_language_code(workspace.reference.language());
    let options = workspace.validation_options();
    let separator = &workspace.settings.key_separator;

    let mut suspects = Vec::new();
    for (language, batch) in document.iter() {
        let reference_tree = if normalize_language_code(language) == reference_key {
            None
        } else {
            Some(workspace.reference.tree())
        };
        for mut suspect in scan_tree_suspects(batch, reference_tree, separator, options) {
            suspect.key = format!("{language}:{}", suspect.key);
            suspects.push(suspect);
        }
    }
    suspects
}
