//! # Validate Subcommand
//!
//! Checks a config document against an externally supplied schema. The
//! schema catalog is resolved at startup from the directory named by the
//! `CFGTEST_SCHEMA_ROOT` environment variable; resolution failure is
//! fatal and independent of the expectation flag.
//!
//! Two modes:
//! - default ("expect valid"): conformance is success
//! - `--expect-fail`: non-conformance is success, confirmed by printing
//!   the first issue
//!
//! A config that does not parse as JSON counts as non-conformance for
//! mode selection, with the parse error as the sole issue.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use cfgtest_schema::{DocumentValidator, SchemaCatalog, Violation, Violations};

/// Environment variable naming the schema root directory.
pub const SCHEMA_ROOT_ENV: &str = "CFGTEST_SCHEMA_ROOT";

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Config document to check.
    pub config: PathBuf,

    /// Succeed when the document does NOT conform.
    #[arg(long)]
    pub expect_fail: bool,

    /// Schema filename within the schema root.
    #[arg(long, default_value = "config.schema.json")]
    pub schema: String,
}

/// Run the validate tool: resolve the schema catalog, compile the named
/// schema, and check the document against the selected expectation.
pub fn run(args: &ValidateArgs) -> anyhow::Result<ExitCode> {
    let root = std::env::var(SCHEMA_ROOT_ENV).with_context(|| {
        format!("{SCHEMA_ROOT_ENV} environment variable must be set to the schema root directory")
    })?;

    // Catalog or schema resolution failure is fatal here, before any
    // expectation logic runs.
    let catalog = SchemaCatalog::new(&root)
        .with_context(|| format!("could not resolve schema catalog from '{root}'"))?;
    let schema = catalog
        .compile(&args.schema)
        .with_context(|| format!("could not resolve schema '{}'", args.schema))?;

    tracing::debug!(
        root = %root,
        schema = %args.schema,
        schemas_loaded = catalog.schema_count(),
        "schema catalog resolved"
    );

    run_with(args, &schema)
}

/// Check the document with an already-constructed validation capability
/// and apply the expectation mode. Split from [`run`] so the outcome
/// logic is testable without a schema catalog on disk.
pub fn run_with(
    args: &ValidateArgs,
    validator: &dyn DocumentValidator,
) -> anyhow::Result<ExitCode> {
    let outcome = conformance(&args.config, validator)?;

    match (args.expect_fail, outcome) {
        (false, Ok(())) => {
            println!("✓ Valid config");
            Ok(ExitCode::SUCCESS)
        }
        (false, Err(violations)) => {
            eprintln!("✗ Invalid config:");
            for violation in violations.violations() {
                eprintln!("  {violation}");
            }
            Ok(ExitCode::FAILURE)
        }
        (true, Err(violations)) => {
            // Violations are non-empty by construction; the first one is
            // enough to confirm the expected failure.
            if let Some(first) = violations.first() {
                println!("✓ Expected failure confirmed: {first}");
            }
            Ok(ExitCode::SUCCESS)
        }
        (true, Ok(())) => {
            eprintln!("✗ Expected failure but config was valid");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Determine conformance of the document at `path`.
///
/// An unreadable file is fatal (the harness pointed at the wrong path);
/// an unparsable one is a conformance failure with the parse error as
/// the sole issue.
fn conformance(
    path: &Path,
    validator: &dyn DocumentValidator,
) -> anyhow::Result<Result<(), Violations>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;

    match serde_json::from_str::<Value>(&content) {
        Ok(document) => Ok(validator.validate(&document)),
        Err(e) => Ok(Err(Violations::new(vec![Violation {
            instance_path: String::new(),
            schema_path: String::new(),
            message: format!("JSON parse error: {e}"),
        }]))),
    }
}
