//! Patch document loading.
//!
//! A patch document is a JSON file holding translation updates. Two shapes
//! are accepted: a multi-language document whose top-level keys are all
//! language codes with object values, or a bare translation tree for a
//! single language named on the command line.

use std::collections::BTreeMap;
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use crate::locale::{
    is_language_code,
    normalize_language_code,
};
use crate::tree::deep_merge;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to read patch document '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("patch document '{}' is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("patch document '{}': root is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error(
        "patch document '{}': top-level key '{key}' is not a language code; \
         pass --language if this is a single-language patch",
        .path.display()
    )]
    NotALanguageBatch { path: PathBuf, key: String },

    #[error(
        "patch document '{}': section '{language}' is not a JSON object; \
         pass --language if this is a single-language patch",
        .path.display()
    )]
    BatchNotAnObject { path: PathBuf, language: String },
}

/// Translation updates grouped by target language.
#[derive(Debug, Clone, Default)]
pub struct PatchDocument {
    /// Language code → patch tree. Trees are always JSON objects.
    batches: BTreeMap<String, Value>,
}

impl PatchDocument {
    /// Loads one patch document.
    ///
    /// With `language` set, the whole file is taken as that language's
    /// tree. Otherwise the file must be a multi-language document.
    ///
    /// # Errors
    /// Fails on unreadable or malformed files, and on documents that fit
    /// neither accepted shape.
    pub fn load(path: &Path, language: Option<&str>) -> Result<Self, PatchError> {
        let text = fs::read_to_string(path)
            .map_err(|source| PatchError::Read { path: path.to_path_buf(), source })?;
        let root: Value = serde_json::from_str(&text)
            .map_err(|source| PatchError::Parse { path: path.to_path_buf(), source })?;
        let Value::Object(map) = root else {
            return Err(PatchError::NotAnObject { path: path.to_path_buf() });
        };

        let mut batches = BTreeMap::new();

        if let Some(language) = language {
            batches.insert(language.to_string(), Value::Object(map));
            return Ok(Self { batches });
        }

        for (key, tree) in map {
            if !is_language_code(&key) {
                return Err(PatchError::NotALanguageBatch { path: path.to_path_buf(), key });
            }
            if !tree.is_object() {
                return Err(PatchError::BatchNotAnObject {
                    path: path.to_path_buf(),
                    language: key,
                });
            }
            batches.insert(key, tree);
        }

        Ok(Self { batches })
    }

    /// Loads several documents in order, merging them into one. Later
    /// documents win where they overlap.
    ///
    /// # Errors
    /// Fails when any single document fails to load.
    pub fn load_all(paths: &[PathBuf], language: Option<&str>) -> Result<Self, PatchError> {
        let mut combined = Self::default();
        for path in paths {
            combined.merge_from(Self::load(path, language)?);
        }
        Ok(combined)
    }

    /// Folds another document into this one, language by language.
    pub fn merge_from(&mut self, other: Self) {
        for (language, tree) in other.batches {
            match self.batches.get_mut(&language) {
                Some(existing) => *existing = deep_merge(existing, &tree),
                None => {
                    self.batches.insert(language, tree);
                }
            }
        }
    }

    /// Language codes carried by this document, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.batches.keys().map(String::as_str)
    }

    /// Iterates `(language, patch tree)` pairs, sorted by language.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.batches.iter().map(|(language, tree)| (language.as_str(), tree))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Finds the batch for a locale file's language, comparing normalized
    /// codes so `pt-BR` and `pt_BR` line up.
    #[must_use]
    pub fn batch_for(&self, language: &str) -> Option<&Value> {
        let normalized = normalize_language_code(language);
        self.batches
            .iter()
            .find_map(|(code, tree)| (normalize_language_code(code) == normalized).then_some(tree))
    }
}
