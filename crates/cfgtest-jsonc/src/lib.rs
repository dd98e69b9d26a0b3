//! # cfgtest-jsonc — JSONC-to-JSON Stripping
//!
//! Turns JSONC (JSON plus `//` line comments, `/*...*/` block comments, and
//! permissive trailing commas) into strict, compact JSON text.
//!
//! The core is a single-pass, string-aware lexer: comment markers are only
//! recognized outside string literals, so a value like
//! `"http://example.com//path"` survives unaltered. This is the one
//! correctness property that separates this stripper from a regex-based one.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cfgtest-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Unterminated strings and block comments are hard errors, never silent
//!   truncation.

pub mod strip;

pub use strip::{strip_comments, strip_trailing_commas, to_compact_json, JsoncError};
