//! Locale file loading.

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use super::language::detect_language;
use crate::tree::walk_leaves;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{}': root is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("cannot infer a language code from '{}'", .path.display())]
    UnknownLanguage { path: PathBuf },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize locale tree: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// One locale file held in memory: raw text plus the parsed tree.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    path: PathBuf,
    language: String,
    text: String,
    tree: Value,
}

impl LocaleFile {
    /// Reads and parses a locale file, inferring its language from the path.
    ///
    /// # Errors
    /// Fails when the file cannot be read, is not valid JSON, has a
    /// non-object root, or its path yields no language code.
    pub fn load(path: &Path) -> Result<Self, LocaleError> {
        let language = detect_language(path)
            .ok_or_else(|| LocaleError::UnknownLanguage { path: path.to_path_buf() })?;

        let text = fs::read_to_string(path)
            .map_err(|source| LocaleError::Read { path: path.to_path_buf(), source })?;

        let tree: Value = serde_json::from_str(&text)
            .map_err(|source| LocaleError::Parse { path: path.to_path_buf(), source })?;
        if !tree.is_object() {
            return Err(LocaleError::NotAnObject { path: path.to_path_buf() });
        }

        Ok(Self { path: path.to_path_buf(), language, text, tree })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Raw file text as read from disk.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Number of translation leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        walk_leaves(&self.tree, |_, _| count += 1);
        count
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn load_parses_language_text_and_tree() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("locales");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("fr.json");
        fs::write(&path, r#"{"common": {"ok": "OK"}}"#).unwrap();

        let file = LocaleFile::load(&path).unwrap();

        expect_that!(file.language(), eq("fr"));
        expect_that!(file.text(), eq(r#"{"common": {"ok": "OK"}}"#));
        expect_that!(file.leaf_count(), eq(1));
    }

    #[googletest::test]
    fn load_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.json");
        fs::write(&path, "{broken").unwrap();

        let result = LocaleFile::load(&path);

        assert!(matches!(result, Err(LocaleError::Parse { .. })));
    }

    #[googletest::test]
    fn load_rejects_non_object_root() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.json");
        fs::write(&path, r#"["not", "an", "object"]"#).unwrap();

        let result = LocaleFile::load(&path);

        assert!(matches!(result, Err(LocaleError::NotAnObject { .. })));
    }

    #[googletest::test]
    fn load_rejects_paths_without_a_language() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("glossary.json");
        fs::write(&path, "{}").unwrap();

        let result = LocaleFile::load(&path);

        assert!(matches!(result, Err(LocaleError::UnknownLanguage { .. })));
    }

    #[googletest::test]
    fn missing_file_reports_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.json");

        let result = LocaleFile::load(&path);

        assert!(matches!(result, Err(LocaleError::Read { .. })));
    }
}
