//! `prune` subcommand: deletes orphan keys from locale files.

use std::io::Write;
use std::path::Path;

use crate::cli::PruneArgs;
use crate::commands::{
    CommandError,
    Workspace,
};
use crate::locale::{
    delete_keys_from_text,
    write_atomic,
};
use crate::tree::compare;

/// Runs the `prune` subcommand.
///
/// Orphans are computed with the same options as `check`, so plural
/// siblings survive pruning.
///
/// # Errors
/// Fails on workspace loading errors, unknown requested languages, and
/// edit or write errors.
pub fn run(args: &PruneArgs, root: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let workspace = Workspace::load(root)?;
    let targets = workspace.filtered_targets(&args.languages)?;
    let options = workspace.diff_options();

    let mut total = 0_usize;
    for target in targets {
        let report = compare(workspace.reference.tree(), target.tree(), &options);
        if report.orphans.is_empty() {
            writeln!(out, "{}: no orphans", target.language())?;
            continue;
        }

        if args.dry_run {
            writeln!(
                out,
                "{}: would delete {} key(s)",
                target.language(),
                report.orphans.len()
            )?;
            for key in &report.orphans {
                writeln!(out, "  - {key}")?;
            }
            total += report.orphans.len();
            continue;
        }

        let outcome = delete_keys_from_text(
            target.text(),
            &report.orphans,
            &workspace.settings.key_separator,
        )?;
        write_atomic(target.path(), &outcome.new_text)?;
        total += outcome.deleted.len();
        writeln!(
            out,
            "{}: deleted {} key(s) -> {}",
            target.language(),
            outcome.deleted.len(),
            workspace.display_path(target)
        )?;
    }

    if args.dry_run {
        writeln!(out, "dry run: would delete {total} key(s)")?;
    } else {
        writeln!(out, "deleted {total} key(s)")?;
    }
    Ok(())
}
