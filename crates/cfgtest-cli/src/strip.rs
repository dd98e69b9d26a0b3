//! # Strip Subcommand
//!
//! Reads UTF-8 JSONC from the input path and writes comment-free,
//! trailing-comma-free compact JSON to the output path. Any lexical or
//! parse error is fatal: the whole contract of this tool is that its
//! output is valid JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;

use cfgtest_jsonc::to_compact_json;

/// Arguments for the strip subcommand.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// JSONC input file.
    pub input: PathBuf,

    /// Output file for the compact JSON.
    pub output: PathBuf,
}

/// Run the strip tool. Exit 0 on success; all failures are fatal.
pub fn run(args: &StripArgs) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read '{}'", args.input.display()))?;

    let compact = to_compact_json(&source)
        .with_context(|| format!("cannot strip '{}'", args.input.display()))?;

    std::fs::write(&args.output, &compact)
        .with_context(|| format!("cannot write '{}'", args.output.display()))?;

    tracing::debug!(
        input = %args.input.display(),
        output = %args.output.display(),
        bytes = compact.len(),
        "stripped JSONC to compact JSON"
    );
    Ok(ExitCode::SUCCESS)
}
