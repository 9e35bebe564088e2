//! File pattern matcher for locale files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::PatchSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid locale file pattern '{pattern}': {source}")]
    InvalidLocalePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against the configured locale file patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    workspace_root: PathBuf,
    locale_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    ///
    /// # Errors
    /// Fails when a configured pattern is not a valid glob.
    pub fn new(workspace_root: PathBuf, settings: &PatchSettings) -> Result<Self, MatcherError> {
        let locale_set = Self::build_glob_set(
            std::slice::from_ref(&settings.locale_files.file_pattern),
            |pattern, source| MatcherError::InvalidLocalePattern { pattern, source },
        )?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { workspace_root, locale_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path matches `localeFiles.filePattern` but not
    /// `excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_locale_file(&self, absolute_path: &Path) -> bool {
        let Ok(relative_path) = absolute_path.strip_prefix(&self.workspace_root) else {
            return false;
        };

        self.is_locale_file_relative(relative_path)
    }

    /// Returns true if the path matches `localeFiles.filePattern` but not
    /// `excludePatterns`.
    ///
    /// The path must be relative to the workspace root.
    #[must_use]
    pub fn is_locale_file_relative(&self, relative_path: &Path) -> bool {
        self.locale_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::*;

    fn create_settings(file_pattern: &str, exclude: &[&str]) -> PatchSettings {
        PatchSettings {
            locale_files: crate::config::LocaleFilesConfig {
                file_pattern: file_pattern.to_string(),
            },
            exclude_patterns: exclude.iter().copied().map(String::from).collect(),
            ..PatchSettings::default()
        }
    }

    #[rstest]
    #[case::simple_layout("src/locales/fr.json", true)]
    #[case::nested_layout("app/locales/fr/extra.json", true)]
    #[case::not_json("src/locales/fr.yaml", false)]
    #[case::outside_locales("src/fr.json", false)]
    fn matches_default_locale_pattern(#[case] path: &str, #[case] expected: bool) {
        let settings = create_settings("**/locales/**/*.json", &[]);
        let matcher = FileMatcher::new(PathBuf::from("/workspace"), &settings).unwrap();

        assert_eq!(matcher.is_locale_file_relative(Path::new(path)), expected);
    }

    #[rstest]
    fn exclude_patterns_win_over_the_locale_pattern() {
        let settings = create_settings("**/locales/**/*.json", &["**/node_modules/**"]);
        let matcher = FileMatcher::new(PathBuf::from("/workspace"), &settings).unwrap();

        assert!(!matcher.is_locale_file_relative(Path::new(
            "node_modules/pkg/locales/en.json"
        )));
        assert!(matcher.is_locale_file_relative(Path::new("src/locales/en.json")));
    }

    #[rstest]
    fn absolute_paths_are_resolved_against_the_root() {
        let settings = create_settings("**/locales/**/*.json", &[]);
        let matcher = FileMatcher::new(PathBuf::from("/workspace"), &settings).unwrap();

        assert!(matcher.is_locale_file(Path::new("/workspace/src/locales/en.json")));
        assert!(!matcher.is_locale_file(Path::new("/elsewhere/src/locales/en.json")));
    }

    #[rstest]
    fn invalid_pattern_is_reported_with_its_source() {
        let settings = create_settings("[invalid", &[]);

        let result = FileMatcher::new(PathBuf::from("/workspace"), &settings);

        assert!(matches!(result, Err(MatcherError::InvalidLocalePattern { .. })));
    }
}
