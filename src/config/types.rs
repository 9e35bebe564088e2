use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::is_language_code;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for the patch tool, read from `.i18n-patch.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatchSettings {
    pub locale_files: LocaleFilesConfig,

    pub exclude_patterns: Vec<String>,

    /// Language every other locale is compared against.
    pub reference_language: String,

    pub key_separator: String,

    /// Keys (or whole subtrees) allowed to stay identical to the reference,
    /// e.g. brand names and "OK".
    pub ignore_identical: Vec<String>,

    /// Exempt plural variants the reference language does not need from
    /// orphan reporting.
    pub plural_aware: bool,

    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleFilesConfig {
    pub file_pattern: String,
}

impl Default for LocaleFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/locales/**/*.json".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Control characters, U+FFFD, and mojibake patterns.
    pub encoding: bool,
    /// Placeholder brace balance and parity with the reference value.
    pub placeholders: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { encoding: true, placeholders: true }
    }
}

impl PatchSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Reference language that is not a language code
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.reference_language.is_empty() {
            errors.push(ValidationError::new(
                "referenceLanguage",
                "The reference language cannot be empty. Example: \"en\"",
            ));
        } else if !is_language_code(&self.reference_language) {
            errors.push(ValidationError::new(
                "referenceLanguage",
                format!(
                    "'{}' does not look like a language code. Examples: \"en\", \"pt-BR\"",
                    self.reference_language
                ),
            ));
        }

        if self.locale_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.locale_files.file_pattern) {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.locale_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, key) in self.ignore_identical.iter().enumerate() {
            if key.is_empty() {
                errors.push(ValidationError::new(
                    format!("ignoreIdentical[{index}]"),
                    "Keys cannot be empty. Example: \"common.ok\"",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            locale_files: LocaleFilesConfig::default(),
            exclude_patterns: vec!["**/node_modules/**".to_string()],
            reference_language: "en".to_string(),
            key_separator: ".".to_string(),
            ignore_identical: Vec::new(),
            plural_aware: true,
            validation: ValidationConfig::default(),
        }
    }
}
