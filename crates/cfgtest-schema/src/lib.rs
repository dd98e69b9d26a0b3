//! # cfgtest-schema — External Schema Validation
//!
//! Validates parsed JSON documents against schemas this crate does not
//! own. Schemas are resolved at startup from a caller-provided root
//! directory (every `*.schema.json` file under it); failure to resolve
//! the catalog is a distinct, fatal condition, never a validation result.
//!
//! The validation capability is injected behind the [`DocumentValidator`]
//! trait: callers hold a `dyn DocumentValidator` and stay agnostic to how
//! it was constructed. The provided implementation compiles schemas with
//! the `jsonschema` crate (Draft 2020-12) and resolves cross-schema
//! `$ref` URIs locally — no network requests, ever.

pub mod validate;

pub use validate::{
    CompiledSchema, DocumentValidator, SchemaCatalog, SchemaError, Violation, Violations,
};
