//! Rendering of check results.

use std::io::{
    self,
    Write,
};

use serde_json::json;

use crate::tree::DiffReport;
use crate::validate::SuspectValue;

/// Findings for one target locale file.
#[derive(Debug, Clone, Default)]
pub struct LanguageReport {
    pub language: String,
    /// Workspace-relative path, for display.
    pub file: String,
    pub diff: DiffReport,
    pub suspects: Vec<SuspectValue>,
}

impl LanguageReport {
    #[must_use]
    pub fn findings(&self) -> usize {
        self.diff.findings() + self.suspects.len()
    }
}

/// Findings for a whole workspace check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub reference_language: String,
    pub languages: Vec<LanguageReport>,
}

impl CheckReport {
    #[must_use]
    pub fn findings(&self) -> usize {
        self.languages.iter().map(LanguageReport::findings).sum()
    }
}

/// Renders the human-readable report.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn render_console(report: &CheckReport, out: &mut impl Write) -> io::Result<()> {
    for language in &report.languages {
        writeln!(out, "{} ({})", language.language, language.file)?;
        writeln!(
            out,
            "  translated: {}  untranslated: {}  orphans: {}",
            language.diff.translated,
            language.diff.untranslated(),
            language.diff.orphans.len()
        )?;
        render_key_section(out, "missing", &language.diff.missing)?;
        render_key_section(
            out,
            &format!("identical to {}", report.reference_language),
            &language.diff.identical,
        )?;
        render_key_section(out, "orphans", &language.diff.orphans)?;
        if !language.suspects.is_empty() {
            writeln!(out, "  suspect:")?;
            for suspect in &language.suspects {
                writeln!(out, "    {suspect}")?;
            }
        }
    }
    writeln!(
        out,
        "{} language(s) checked, {} finding(s)",
        report.languages.len(),
        report.findings()
    )?;
    Ok(())
}

fn render_key_section(out: &mut impl Write, title: &str, keys: &[String]) -> io::Result<()> {
    if keys.is_empty() {
        return Ok(());
    }
    writeln!(out, "  {title}:")?;
    for key in keys {
        writeln!(out, "    {key}")?;
    }
    Ok(())
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn render_json(report: &CheckReport, out: &mut impl Write) -> io::Result<()> {
    let languages: Vec<_> = report
        .languages
        .iter()
        .map(|language| {
            json!({
                "language": language.language,
                "file": language.file,
                "summary": {
                    "translated": language.diff.translated,
                    "missing": language.diff.missing.len(),
                    "identical": language.diff.identical.len(),
                    "ignored": language.diff.ignored,
                    "orphans": language.diff.orphans.len(),
                    "suspects": language.suspects.len(),
                },
                "missing": language.diff.missing,
                "identical": language.diff.identical,
                "orphans": language.diff.orphans,
                "suspects": language.suspects.iter().map(|suspect| {
                    json!({"key": suspect.key, "reason": suspect.reason.to_string()})
                }).collect::<Vec<_>>(),
            })
        })
        .collect();

    let value = json!({
        "referenceLanguage": report.reference_language,
        "languages": languages,
        "findings": report.findings(),
    });

    let mut text = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
    text.push('\n');
    out.write_all(text.as_bytes())
}

/// Renders the report as CSV with one row per finding.
///
/// # Errors
/// Propagates write errors from `out`.
pub fn render_csv(report: &CheckReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "language,file,key,status,detail")?;
    for language in &report.languages {
        let mut row = |key: &str, status: &str, detail: &str| {
            writeln!(
                out,
                "{},{},{},{},{}",
                csv_field(&language.language),
                csv_field(&language.file),
                csv_field(key),
                status,
                csv_field(detail)
            )
        };
        for key in &language.diff.missing {
            row(key, "missing", "")?;
        }
        for key in &language.diff.identical {
            row(key, "identical", "")?;
        }
        for key in &language.diff.orphans {
            row(key, "orphan", "")?;
        }
        for suspect in &language.suspects {
            row(&suspect.key, "suspect", &suspect.reason.to_string())?;
        }
    }
    Ok(())
}

/// Quotes a field when it carries a comma, quote, or newline.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
