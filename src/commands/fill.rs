//! `fill` subcommand: copies missing keys from the reference language.

use std::io::Write;
use std::path::Path;

use serde_json::{
    Map,
    Value,
};

use crate::cli::FillArgs;
use crate::commands::{
    CommandError,
    Workspace,
};
use crate::locale::{
    apply_patch_to_text,
    write_atomic,
};
use crate::tree::{
    insert_leaf,
    lookup_path,
    walk_leaves,
};

/// Runs the `fill` subcommand.
///
/// Filled keys carry the reference value verbatim, so a later `check`
/// reports them as identical until they are translated.
///
/// # Errors
/// Fails on workspace loading errors, unknown requested languages, and
/// write errors.
pub fn run(args: &FillArgs, root: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let workspace = Workspace::load(root)?;
    let targets = workspace.filtered_targets(&args.languages)?;

    let mut total = 0_usize;
    for target in targets {
        let mut missing: Map<String, Value> = Map::new();
        let mut count = 0_usize;
        walk_leaves(workspace.reference.tree(), |path, value| {
            if lookup_path(target.tree(), path).is_none() {
                insert_leaf(&mut missing, path, value.clone());
                count += 1;
            }
        });

        if count == 0 {
            writeln!(out, "{}: nothing missing", target.language())?;
            continue;
        }
        total += count;

        if args.dry_run {
            writeln!(out, "{}: would fill {} key(s)", target.language(), count)?;
            continue;
        }

        let new_text = apply_patch_to_text(target.text(), &missing)?;
        write_atomic(target.path(), &new_text)?;
        writeln!(
            out,
            "{}: filled {} key(s) -> {}",
            target.language(),
            count,
            workspace.display_path(target)
        )?;
    }

    if args.dry_run {
        writeln!(out, "dry run: would fill {total} key(s)")?;
    } else {
        writeln!(out, "filled {total} key(s)")?;
    }
    Ok(())
}
