//! # cfgtest-diff — Structural JSON Comparison
//!
//! Recursive comparison of two parsed JSON documents, reporting every
//! structural divergence as a path-addressed record. Key order and
//! whitespace are invisible; only tree shape and scalar values matter.
//!
//! Paths are `$`-rooted: `.key` for object members, `[i]` for array
//! indices. The two sides are named by role — `candidate` (the document
//! under test) and `reference` (the document it must match).
//!
//! ## Crate Policy
//!
//! - Pure comparison over `serde_json::Value`; no I/O, no process exit
//!   decisions. The CLI layer owns printing and exit codes.
//! - No dependencies on other `cfgtest-*` crates.

pub mod allow;
pub mod diff;

pub use allow::AllowList;
pub use diff::{deep_diff, Diff};
