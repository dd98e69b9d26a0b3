//! # cfgtest CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// Config conformance toolkit.
///
/// Strips JSONC down to strict JSON, structurally diffs JSON documents,
/// and validates configs against an external schema catalog. Each
/// subcommand is a single-shot batch tool: files in, exit code out.
#[derive(Parser, Debug)]
#[command(name = "cfgtest", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Strip JSONC comments and trailing commas, write compact JSON.
    Strip(cfgtest_cli::strip::StripArgs),
    /// Structurally compare a candidate document against a reference.
    Diff(cfgtest_cli::diff::DiffArgs),
    /// Validate a config document against an external schema.
    Validate(cfgtest_cli::validate::ValidateArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Strip(args) => cfgtest_cli::strip::run(&args),
        Commands::Diff(args) => cfgtest_cli::diff::run(&args),
        Commands::Validate(args) => cfgtest_cli::validate::run(&args),
    }
}
