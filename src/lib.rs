//! i18n-patch
//!
//! JSON ロケールファイルへ翻訳パッチを適用し、基準言語との差分を点検する
//! コマンドラインツール

pub mod cli;
pub mod commands;
pub mod config;
pub mod locale;
pub mod patch;
pub mod report;
pub mod tree;
pub mod validate;

// Workspace を再エクスポート
pub use commands::Workspace;
