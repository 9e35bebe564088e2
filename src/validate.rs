//! Validation of translation values.
//!
//! Flags text that most likely arrived broken: control characters, the
//! U+FFFD replacement character, byte patterns typical of UTF-8 decoded
//! through a legacy code page, and damaged `{{placeholder}}` tokens.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Interpolation token, i18next style: `{{name}}` or `{{count, number}}`.
#[allow(clippy::expect_used)] // literal pattern, always compiles
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([\w$][\w.$-]*)(?:\s*,\s*[^{}]*)?\s*\}\}")
        .expect("placeholder pattern is valid")
});

/// First characters of byte pairs produced when UTF-8 multibyte sequences
/// are decoded as Mac Roman or Windows-1252.
const MOJIBAKE_LEADS: &[char] = &['–', '—', 'Ã', 'Â', 'â', '€', '√', '∆', '≈', '¬'];

/// Why a translation value was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuspectReason {
    /// A C0/C1 control character is embedded in the text.
    ControlCharacter(char),
    /// The text contains U+FFFD, so it was already decoded lossily once.
    ReplacementCharacter,
    /// Character pairs typical of UTF-8 read through a legacy code page.
    MojibakePattern,
    /// `{{` / `}}` braces that do not pair up into placeholders.
    UnbalancedPlaceholder,
    /// The placeholder set differs from the reference value.
    PlaceholderMismatch {
        /// Placeholders the reference value uses, sorted.
        expected: Vec<String>,
        /// Placeholders this value uses, sorted.
        found: Vec<String>,
    },
}

impl fmt::Display for SuspectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControlCharacter(c) => {
                write!(f, "embedded control character U+{:04X}", u32::from(*c))
            }
            Self::ReplacementCharacter => {
                write!(f, "contains the U+FFFD replacement character")
            }
            Self::MojibakePattern => {
                write!(f, "looks like UTF-8 decoded through a legacy code page")
            }
            Self::UnbalancedPlaceholder => write!(f, "unbalanced placeholder braces"),
            Self::PlaceholderMismatch { expected, found } => write!(
                f,
                "placeholders [{}] do not match the reference [{}]",
                found.join(", "),
                expected.join(", ")
            ),
        }
    }
}

/// A flagged translation value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspectValue {
    /// Joined leaf path of the value.
    pub key: String,
    pub reason: SuspectReason,
}

impl fmt::Display for SuspectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

/// Which checks to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Control characters, U+FFFD, and mojibake patterns.
    pub encoding: bool,
    /// Placeholder brace balance and parity with the reference value.
    pub placeholders: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            encoding: true,
            placeholders: true,
        }
    }
}

/// Checks one leaf value, optionally against its reference counterpart.
///
/// Only string values are inspected. The first problem found wins, in
/// severity order: encoding damage before placeholder trouble.
#[must_use]
pub fn check_leaf(
    value: &Value,
    reference: Option<&Value>,
    options: ValidationOptions,
) -> Option<SuspectReason> {
    let text = value.as_str()?;

    if options.encoding
        && let Some(reason) = check_encoding(text)
    {
        return Some(reason);
    }

    if options.placeholders {
        if !placeholders_are_balanced(text) {
            return Some(SuspectReason::UnbalancedPlaceholder);
        }
        if let Some(reference_text) = reference.and_then(Value::as_str) {
            let expected = placeholder_names(reference_text);
            let found = placeholder_names(text);
            if expected != found {
                return Some(SuspectReason::PlaceholderMismatch {
                    expected: expected.into_iter().collect(),
                    found: found.into_iter().collect(),
                });
            }
        }
    }

    None
}

/// Extracts the set of placeholder names used in a value.
///
/// # Examples
/// - `"Hello {{name}}"` → `{"name"}`
/// - `"{{count, number}} items"` → `{"count"}`
#[must_use]
pub fn placeholder_names(text: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

fn check_encoding(text: &str) -> Option<SuspectReason> {
    for c in text.chars() {
        if c.is_control() && !matches!(c, '\n' | '\r' | '\t') {
            return Some(SuspectReason::ControlCharacter(c));
        }
        if c == '\u{FFFD}' {
            return Some(SuspectReason::ReplacementCharacter);
        }
    }
    if looks_like_mojibake(text) {
        return Some(SuspectReason::MojibakePattern);
    }
    None
}

/// Two or more lead characters each followed by another non-ASCII character
/// is a strong mojibake signal. Legitimate uses (dashes, euro signs, French
/// circumflexes) are followed by ASCII.
fn looks_like_mojibake(text: &str) -> bool {
    let mut pairs = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if MOJIBAKE_LEADS.contains(&c)
            && chars.peek().is_some_and(|next| !next.is_ascii())
        {
            pairs += 1;
            if pairs >= 2 {
                return true;
            }
        }
    }
    false
}

/// True when every `{{` / `}}` in the text belongs to a well-formed token.
fn placeholders_are_balanced(text: &str) -> bool {
    let stripped = PLACEHOLDER.replace_all(text, "");
    !stripped.contains("{{") && !stripped.contains("}}")
}
