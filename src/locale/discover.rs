//! Locale file discovery.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ignore::WalkBuilder;
use thiserror::Error;

use super::file::{
    LocaleError,
    LocaleFile,
};
use super::language::normalize_language_code;
use crate::config::FileMatcher;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(
        "language '{language}' has multiple locale files: '{}' and '{}'",
        .first.display(),
        .second.display()
    )]
    DuplicateLanguage {
        language: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Finds and loads every locale file under the matcher's workspace root.
///
/// Files whose path yields no language code are logged and skipped. One
/// file per language is required; the result is sorted by language code.
///
/// # Errors
/// Fails when a matched file cannot be read or parsed, or when two files
/// resolve to the same language.
pub fn discover_locales(matcher: &FileMatcher) -> Result<Vec<LocaleFile>, DiscoverError> {
    let mut by_language: BTreeMap<String, LocaleFile> = BTreeMap::new();

    for result in WalkBuilder::new(matcher.workspace_root())
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !matcher.is_locale_file(path) {
            continue;
        }

        let file = match LocaleFile::load(path) {
            Ok(file) => file,
            Err(LocaleError::UnknownLanguage { path }) => {
                tracing::warn!(
                    path = %path.display(),
                    "Skipping matched file with no language code in its path"
                );
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let key = normalize_language_code(file.language());
        if let Some(existing) = by_language.get(&key) {
            return Err(DiscoverError::DuplicateLanguage {
                language: file.language().to_string(),
                first: existing.path().to_path_buf(),
                second: file.path().to_path_buf(),
            });
        }
        by_language.insert(key, file);
    }

    tracing::debug!(count = by_language.len(), "Discovered locale files");
    Ok(by_language.into_values().collect())
}
