//! # cfgtest-cli — Config Conformance Command-Line Interface
//!
//! Three developer-test utilities behind one `cfgtest` binary:
//!
//! - `strip` — JSONC in, comment-free compact JSON out
//! - `diff` — structural comparison of a candidate document against a reference
//! - `validate` — schema conformance against an externally supplied schema root
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from the check logic,
//!   which lives in the domain crates. Handlers here only do I/O, printing,
//!   and exit-code selection.
//! - Contractual output lines (`STRUCTURALLY_IDENTICAL`, `DIFFERENCES:`,
//!   the validation verdicts) are printed verbatim — CI pipelines parse
//!   them, so they never go through tracing.

pub mod diff;
pub mod strip;
pub mod validate;
