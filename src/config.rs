//! Tool configuration: settings file, validation, and file matching.

/// Config file loader
mod loader;
/// Locale file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::load_settings;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    LocaleFilesConfig,
    PatchSettings,
    ValidationConfig,
    ValidationError,
};
