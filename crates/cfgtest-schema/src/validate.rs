//! # Schema Catalog and Document Validation
//!
//! Loads every `*.schema.json` under one root directory, compiles
//! individual schemas on demand, and reports conformance as an ordered
//! list of structured violations.
//!
//! ## Schema Resolution
//!
//! Cross-schema `$ref` URIs are resolved locally: each loaded schema is
//! indexed under its own `$id` (when present) and under its bare
//! filename. A retriever installed on the compiler serves those lookups
//! from memory, so validation works offline and unresolvable references
//! fail at compile time instead of triggering network fetches.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// Error while resolving or compiling schemas. These are fatal catalog
/// conditions, distinct from a document failing validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema root could not be read, or a schema file in it is not
    /// valid JSON.
    #[error("schema catalog unavailable at '{root}': {reason}")]
    CatalogUnavailable {
        /// The root directory that was being loaded.
        root: String,
        /// Why loading failed.
        reason: String,
    },

    /// The requested schema is not present in the catalog.
    #[error("schema '{schema_name}' not found under '{root}'")]
    UnknownSchema {
        /// The schema filename that was requested.
        schema_name: String,
        /// The catalog root that was searched.
        root: String,
    },

    /// The schema was found but could not be compiled into a validator.
    #[error("schema '{schema_name}' failed to compile: {reason}")]
    ValidatorBuild {
        /// The schema filename.
        schema_name: String,
        /// Compiler error text.
        reason: String,
    },

    /// IO error reading the catalog.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single conformance violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer within the schema that triggered the violation.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Ordered collection of violations from one validation pass.
#[derive(Debug, Clone)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Wrap a non-empty violation list.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation, if any.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// All violations, in instance order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner list.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// The injected validation capability: maps a parsed document to a
/// structured conformance result. Tools are written against this trait
/// and stay agnostic to how the capability was constructed.
pub trait DocumentValidator {
    /// Check one document. `Ok(())` means conformant; `Err` carries the
    /// ordered violation list.
    fn validate(&self, instance: &Value) -> Result<(), Violations>;
}

/// Retriever that serves `$ref` lookups from schemas already in memory.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Fall back to the filename component, so relative and absolute
        // spellings of the same schema resolve identically.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }

        Err(format!("schema reference '{uri_str}' does not resolve locally").into())
    }
}

/// A catalog of schemas loaded from one external root directory.
///
/// Reads every `*.schema.json` file in the root at construction time and
/// indexes it by filename. Compiled validators are produced on demand via
/// [`SchemaCatalog::compile`].
#[derive(Debug)]
pub struct SchemaCatalog {
    root: PathBuf,
    /// Filename (e.g. "config.schema.json") -> parsed schema.
    schemas: HashMap<String, Value>,
}

impl SchemaCatalog {
    /// Load the catalog from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::CatalogUnavailable`] when the directory
    /// cannot be read or any schema file in it is not valid JSON.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let root = root.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries =
            std::fs::read_dir(&root).map_err(|e| SchemaError::CatalogUnavailable {
                root: root.display().to_string(),
                reason: format!("cannot read schema directory: {e}"),
            })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".schema.json") {
                    let content = std::fs::read_to_string(&path)?;
                    let value: Value = serde_json::from_str(&content).map_err(|e| {
                        SchemaError::CatalogUnavailable {
                            root: root.display().to_string(),
                            reason: format!("'{name}' is not valid JSON: {e}"),
                        }
                    })?;
                    schemas.insert(name.to_string(), value);
                }
            }
        }

        Ok(Self { root, schemas })
    }

    /// The catalog root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Build compiler options with every catalog schema registered for
    /// `$ref` resolution, under both its `$id` and its bare filename.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);

        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (filename, value) in &self.schemas {
            if let Some(id) = value.get("$id").and_then(|v| v.as_str()) {
                schemas_by_uri.insert(id.to_string(), value.clone());
            }
            schemas_by_uri.insert(filename.clone(), value.clone());
        }

        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });
        opts
    }

    /// Compile a named schema into a reusable validation capability.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSchema`] when the name is not in the
    /// catalog, or [`SchemaError::ValidatorBuild`] when the schema does
    /// not compile.
    pub fn compile(&self, schema_name: &str) -> Result<CompiledSchema, SchemaError> {
        let schema_value =
            self.schemas
                .get(schema_name)
                .ok_or_else(|| SchemaError::UnknownSchema {
                    schema_name: schema_name.to_string(),
                    root: self.root.display().to_string(),
                })?;

        let opts = self.build_options();
        let validator = opts
            .build(schema_value)
            .map_err(|e| SchemaError::ValidatorBuild {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            })?;

        Ok(CompiledSchema {
            schema_name: schema_name.to_string(),
            validator,
        })
    }
}

/// A compiled schema, ready to check documents.
pub struct CompiledSchema {
    schema_name: String,
    validator: Validator,
}

impl CompiledSchema {
    /// The filename of the schema this validator was compiled from.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl DocumentValidator for CompiledSchema {
    fn validate(&self, instance: &Value) -> Result<(), Violations> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations::new(violations))
        }
    }
}
