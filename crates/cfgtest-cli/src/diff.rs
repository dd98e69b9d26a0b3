//! # Diff Subcommand
//!
//! Parses two JSON documents and reports every structural divergence.
//! Allow-listed differences are subtracted before the pass/fail decision
//! and reported separately as informational.
//!
//! Output contract (parsed by CI):
//! - no real differences: optional `Known normalizations (expected):`
//!   block, then `STRUCTURALLY_IDENTICAL`, exit 0
//! - otherwise: `DIFFERENCES:` followed by one indented line per diff,
//!   exit 1

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use cfgtest_diff::{deep_diff, AllowList};

/// Arguments for the diff subcommand.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Document under test.
    pub candidate: PathBuf,

    /// Document the candidate must structurally match.
    pub reference: PathBuf,

    /// Newline-delimited file of known-ignorable diff lines
    /// (full `path: reason` strings; `#` starts a comment).
    #[arg(long, value_name = "FILE")]
    pub allow: Option<PathBuf>,
}

/// Run the diff tool. Exit 0 when no non-allow-listed differences remain.
pub fn run(args: &DiffArgs) -> anyhow::Result<ExitCode> {
    let candidate = read_json(&args.candidate)?;
    let reference = read_json(&args.reference)?;

    let allow = match &args.allow {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read allow-list '{}'", path.display()))?;
            AllowList::from_lines(&text)
        }
        None => AllowList::new(),
    };

    let (real, allowed) = allow.partition(deep_diff(&candidate, &reference));

    if real.is_empty() {
        if !allowed.is_empty() {
            println!("Known normalizations (expected):");
            for diff in &allowed {
                println!("  {diff}");
            }
        }
        println!("STRUCTURALLY_IDENTICAL");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("DIFFERENCES:");
        for diff in &real {
            println!("  {diff}");
        }
        Ok(ExitCode::FAILURE)
    }
}

/// Parse one input document. Unparsable input is fatal for the differ —
/// it compares parsed values, not text.
fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not valid JSON", path.display()))
}
