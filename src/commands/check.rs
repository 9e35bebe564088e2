//! `check` subcommand: audits locale files against the reference.

use std::io::Write;
use std::path::Path;

use crate::cli::{
    CheckArgs,
    ReportFormat,
};
use crate::commands::{
    CommandError,
    Workspace,
    scan_tree_suspects,
};
use crate::report::{
    CheckReport,
    LanguageReport,
    render_console,
    render_csv,
    render_json,
};
use crate::tree::{
    DiffReport,
    compare,
};

/// Runs the `check` subcommand and returns the number of findings.
///
/// The reference file itself only contributes encoding findings; the
/// comparison findings come from the targets.
///
/// # Errors
/// Fails on workspace loading errors, unknown requested languages, and
/// report rendering errors.
pub fn run(args: &CheckArgs, root: &Path, out: &mut impl Write) -> Result<usize, CommandError> {
    let workspace = Workspace::load(root)?;
    let targets = workspace.filtered_targets(&args.languages)?;
    let options = workspace.diff_options();
    let validation = workspace.validation_options();
    let separator = &workspace.settings.key_separator;

    let mut report = CheckReport {
        reference_language: workspace.reference.language().to_string(),
        languages: Vec::new(),
    };

    let reference_suspects =
        scan_tree_suspects(workspace.reference.tree(), None, separator, validation);
    if !reference_suspects.is_empty() {
        report.languages.push(LanguageReport {
            language: workspace.reference.language().to_string(),
            file: workspace.display_path(&workspace.reference),
            diff: DiffReport::default(),
            suspects: reference_suspects,
        });
    }

    for target in targets {
        let diff = compare(workspace.reference.tree(), target.tree(), &options);
        let suspects = scan_tree_suspects(
            target.tree(),
            Some(workspace.reference.tree()),
            separator,
            validation,
        );
        report.languages.push(LanguageReport {
            language: target.language().to_string(),
            file: workspace.display_path(target),
            diff,
            suspects,
        });
    }

    match args.format {
        ReportFormat::Console => render_console(&report, out)?,
        ReportFormat::Json => render_json(&report, out)?,
        ReportFormat::Csv => render_csv(&report, out)?,
    }
    Ok(report.findings())
}
