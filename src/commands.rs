//! Subcommand drivers.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::config::{
    self,
    ConfigError,
    FileMatcher,
    MatcherError,
    PatchSettings,
};
use crate::locale::{
    DiscoverError,
    EditError,
    LocaleError,
    LocaleFile,
    discover_locales,
    normalize_language_code,
};
use crate::patch::PatchError;
use crate::tree::{
    DiffOptions,
    lookup_path,
    walk_leaves,
};
use crate::validate::{
    SuspectValue,
    ValidationOptions,
    check_leaf,
};

/// Applies patch documents to locale files
pub mod apply;
/// Audits locale files against the reference language
pub mod check;
/// Copies missing keys from the reference language
pub mod fill;
/// Deletes orphan keys from locale files
pub mod prune;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("no locale file found for reference language '{language}'")]
    ReferenceNotFound { language: String },

    #[error("no locale file found for language '{language}' (known: {})", .known.join(", "))]
    UnknownLanguage { language: String, known: Vec<String> },

    #[error(
        "refusing to write {} suspect value(s):\n{}\nuse --allow-suspect to write them anyway",
        .suspects.len(),
        format_suspects(.suspects)
    )]
    SuspectValues { suspects: Vec<SuspectValue> },
}

fn format_suspects(suspects: &[SuspectValue]) -> String {
    suspects.iter().map(|s| format!("  - {s}")).collect::<Vec<_>>().join("\n")
}

/// Workspace state every subcommand starts from: validated settings, the
/// reference locale, and the remaining target locales.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    pub settings: PatchSettings,
    pub reference: LocaleFile,
    pub targets: Vec<LocaleFile>,
}

impl Workspace {
    /// Loads settings and discovers locale files under `root`.
    ///
    /// # Errors
    /// Fails on configuration, discovery, or locale loading errors, and
    /// when no file for the reference language exists.
    pub fn load(root: &Path) -> Result<Self, CommandError> {
        let settings = config::load_settings(root)?;
        let matcher = FileMatcher::new(root.to_path_buf(), &settings)?;
        let locales = discover_locales(&matcher)?;

        let reference_key = normalize_language_code(&settings.reference_language);
        let mut reference = None;
        let mut targets = Vec::new();
        for file in locales {
            if normalize_language_code(file.language()) == reference_key {
                reference = Some(file);
            } else {
                targets.push(file);
            }
        }
        let reference = reference.ok_or_else(|| CommandError::ReferenceNotFound {
            language: settings.reference_language.clone(),
        })?;

        tracing::debug!(
            reference = reference.language(),
            targets = targets.len(),
            "Workspace loaded"
        );
        Ok(Self { root: root.to_path_buf(), settings, reference, targets })
    }

    /// Target locales, narrowed to `requested` languages when non-empty.
    ///
    /// # Errors
    /// Fails when a requested language has no locale file.
    pub fn filtered_targets(&self, requested: &[String]) -> Result<Vec<&LocaleFile>, CommandError> {
        if requested.is_empty() {
            return Ok(self.targets.iter().collect());
        }

        for code in requested {
            let normalized = normalize_language_code(code);
            let found = self
                .targets
                .iter()
                .any(|file| normalize_language_code(file.language()) == normalized);
            if !found {
                return Err(CommandError::UnknownLanguage {
                    language: code.clone(),
                    known: self.known_languages(),
                });
            }
        }

        let requested_keys: Vec<String> =
            requested.iter().map(|code| normalize_language_code(code)).collect();
        Ok(self
            .targets
            .iter()
            .filter(|file| requested_keys.contains(&normalize_language_code(file.language())))
            .collect())
    }

    /// Finds any locale file, the reference included, by language code.
    #[must_use]
    pub fn find_file(&self, language: &str) -> Option<&LocaleFile> {
        let normalized = normalize_language_code(language);
        std::iter::once(&self.reference)
            .chain(self.targets.iter())
            .find(|file| normalize_language_code(file.language()) == normalized)
    }

    /// Every known language code, reference first.
    #[must_use]
    pub fn known_languages(&self) -> Vec<String> {
        std::iter::once(&self.reference)
            .chain(self.targets.iter())
            .map(|file| file.language().to_string())
            .collect()
    }

    /// Workspace-relative display path for a locale file.
    #[must_use]
    pub fn display_path(&self, file: &LocaleFile) -> String {
        file.path().strip_prefix(&self.root).unwrap_or(file.path()).display().to_string()
    }

    /// Comparison options derived from the settings.
    #[must_use]
    pub fn diff_options(&self) -> DiffOptions<'_> {
        DiffOptions {
            separator: &self.settings.key_separator,
            ignore_identical: &self.settings.ignore_identical,
            plural_aware: self.settings.plural_aware,
        }
    }

    /// Validation options derived from the settings.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            encoding: self.settings.validation.encoding,
            placeholders: self.settings.validation.placeholders,
        }
    }
}

/// Runs value validation over every leaf of a tree. Leaves are checked
/// against the reference value at the same path when a reference tree is
/// given.
pub(crate) fn scan_tree_suspects(
    tree: &Value,
    reference: Option<&Value>,
    separator: &str,
    options: ValidationOptions,
) -> Vec<SuspectValue> {
    let mut suspects = Vec::new();
    walk_leaves(tree, |path, value| {
        let reference_value = reference.and_then(|reference| lookup_path(reference, path));
        if let Some(reason) = check_leaf(value, reference_value, options) {
            suspects.push(SuspectValue { key: path.join(separator), reason });
        }
    });
    suspects
}
