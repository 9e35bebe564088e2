//! Entry point for the locale patching command line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use i18n_patch::cli::{
    Cli,
    Command,
};
use i18n_patch::commands;
use tracing_subscriber::EnvFilter;

/// ログレベルは -v の回数で決める。RUST_LOG があればそちらが優先される。
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

/// エラーを標準エラーへ出して終了コードに反映させる
#[allow(clippy::print_stderr)]
fn report_error(error: &commands::CommandError) {
    eprintln!("error: {error}");
}

/// Parses the command line, runs the subcommand, and maps the outcome to
/// an exit code. `check --strict` fails on findings, every other failure
/// comes from an error.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut out = io::stdout();
    let result = match &cli.command {
        Command::Apply(args) => {
            commands::apply::run(args, &cli.root, &mut out).map(|()| ExitCode::SUCCESS)
        }
        Command::Check(args) => commands::check::run(args, &cli.root, &mut out).map(|findings| {
            if args.strict && findings > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }),
        Command::Fill(args) => {
            commands::fill::run(args, &cli.root, &mut out).map(|()| ExitCode::SUCCESS)
        }
        Command::Prune(args) => {
            commands::prune::run(args, &cli.root, &mut out).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            report_error(&error);
            ExitCode::FAILURE
        }
    }
}
