//! Language identification for locale file paths.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// ISO-ish language code: `en`, `fra`, `pt-BR`, `zh_CN`.
#[allow(clippy::expect_used)] // literal pattern, always compiles
static LANGUAGE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}([-_][A-Za-z]{2,4})?$").expect("language code pattern is valid")
});

/// True when `code` has the shape of a language code.
#[must_use]
pub fn is_language_code(code: &str) -> bool {
    LANGUAGE_CODE.is_match(code)
}

/// Normalizes a language code for comparison (`pt-BR` → `pt_br`).
#[must_use]
pub fn normalize_language_code(code: &str) -> String {
    code.to_lowercase().replace('-', "_")
}

/// Infers the language of a locale file from its path.
///
/// The file stem wins; otherwise the immediate parent directory, if its
/// name looks like a language code. Deeper ancestors are not considered.
///
/// # Examples
/// - `locales/fr.json` → `fr`
/// - `messages/pt-BR.json` → `pt-BR`
/// - `locales/fr/extra.json` → `fr`
/// - `locales/glossary.json` → `None`
#[must_use]
pub fn detect_language(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if is_language_code(stem) {
        return Some(stem.to_string());
    }

    let parent = path.parent()?.file_name()?.to_str()?;
    is_language_code(parent).then(|| parent.to_string())
}
