//! コマンドライン引数の定義

use std::path::PathBuf;

use clap::{
    ArgAction,
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};

/// Patches and audits JSON locale files against a reference language.
#[derive(Debug, Parser)]
#[command(name = "i18n-patch", version, about)]
pub struct Cli {
    /// Workspace root to operate in
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge patch documents into locale files
    Apply(ApplyArgs),
    /// Report missing, identical, orphan, and suspect values
    Check(CheckArgs),
    /// Copy missing keys from the reference language
    Fill(FillArgs),
    /// Delete keys the reference language no longer has
    Prune(PruneArgs),
}

/// Arguments for `apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Patch documents to apply, in order
    #[arg(required = true)]
    pub patches: Vec<PathBuf>,

    /// Treat each document as a single batch for this language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Rewrite files in canonical form instead of editing in place
    #[arg(long)]
    pub reformat: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write values even when validation flags them as suspect
    #[arg(long)]
    pub allow_suspect: bool,
}

/// Arguments for `check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Languages to check (all targets when omitted)
    pub languages: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub format: ReportFormat,

    /// Exit with a failure code when any finding is reported
    #[arg(long)]
    pub strict: bool,
}

/// Report output formats for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human readable, grouped per language
    Console,
    /// Single JSON object for tooling
    Json,
    /// One row per finding
    Csv,
}

/// Arguments for `fill`.
#[derive(Debug, Args)]
pub struct FillArgs {
    /// Languages to fill (all targets when omitted)
    pub languages: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `prune`.
#[derive(Debug, Args)]
pub struct PruneArgs {
    /// Languages to prune (all targets when omitted)
    pub languages: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
