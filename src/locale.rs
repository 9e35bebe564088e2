//! Locale files: discovery, loading, editing, and writing.

/// Workspace discovery
mod discover;
/// Format-preserving CST edits
mod editor;
/// File loading
mod file;
/// Language identification
mod language;
/// Canonical serialization and atomic writes
mod writer;

pub use discover::{
    DiscoverError,
    discover_locales,
};
pub use editor::{
    DeletionOutcome,
    EditError,
    apply_patch_to_text,
    delete_keys_from_text,
};
pub use file::{
    LocaleError,
    LocaleFile,
};
pub use language::{
    detect_language,
    is_language_code,
    normalize_language_code,
};
pub use writer::{
    to_canonical_json,
    write_atomic,
};
