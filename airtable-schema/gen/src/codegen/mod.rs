//! Code generation for Airtable CRUD modules.
//!
//! This module turns a canonical [`Schema`] into the generated module tree.
//! Each submodule handles one artifact or one stage of the pipeline.
//!
//! ## Submodules
//!
//! - [`plan`] - Derives and collision-checks every identifier before any tokens exist
//! - [`artifact`] - Ordered, name-checked declaration lists rendered once
//! - [`constants`] - `schema.rs`: the `Tables` enum, table statics and column constants
//! - [`bindings`] - `airtable.rs`: native-format functions per table
//! - [`wrapper`] - `request.rs`: canonical CRUD functions grouped by operation
//! - [`module_docs`] - `//!` documentation for each generated file
//!
//! ## Code Generation Flow
//!
//! 1. [`SchemaPlan::build`] names every table, column and lookup
//! 2. Each artifact generator appends declarations to an [`Artifact`]
//! 3. [`Artifact::render`] validates the tokens with `syn` and formats them
//!    with `prettyplease`
//!
//! See [`crate::output`] for validation, formatting and file writing.

pub mod artifact;
pub mod bindings;
pub mod constants;
pub mod module_docs;
pub mod plan;
pub mod wrapper;

use std::collections::BTreeMap;

use airtable_schema_define::{NamingExceptions, Schema, TableMetadata};
use quote::quote;
use tracing::{debug, instrument};

use crate::config::DEFAULT_VIEW;
use crate::errors::GeneratorError;
use crate::merge::apply_metadata;

pub use artifact::{Artifact, Declaration};
pub use module_docs::{ArtifactKind, ModuleDocBuilder};
pub use plan::{ColumnPlan, LookupPlan, SchemaPlan, TablePlan};
pub use wrapper::CrudOperation;

/// Constants module file name.
pub const SCHEMA_FILE: &str = "schema.rs";
/// Bindings module file name.
pub const BINDINGS_FILE: &str = "airtable.rs";
/// Wrapper module file name.
pub const REQUEST_FILE: &str = "request.rs";
/// Parent module file name.
pub const MOD_FILE: &str = "mod.rs";
/// Canonical schema snapshot file name.
pub const SNAPSHOT_FILE: &str = "schema.json";

/// Options that shape the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Names that bypass the plural heuristic.
    pub naming_exceptions: NamingExceptions,
    /// View passed to select queries.
    pub default_view: String,
    /// Base id emitted as `BASE_ID`, if known.
    pub base_id: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            naming_exceptions: NamingExceptions::default(),
            default_view: DEFAULT_VIEW.to_string(),
            base_id: None,
        }
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory.
    pub file_name: &'static str,
    /// Full file contents.
    pub contents: String,
}

/// Every file produced by one generation run, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    /// Rendered files.
    pub files: Vec<GeneratedFile>,
}

impl GeneratedArtifacts {
    /// Returns the contents of `file_name`, if generated.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| f.contents.as_str())
    }
}

/// Generates the full module tree for `schema`.
///
/// `metadata` holds the effective per-table lookup fields, keyed by native
/// table name. Everything is planned and rendered before this returns, so a
/// failure leaves nothing half-generated.
///
/// ## Errors
///
/// - [`GeneratorError::EmptyIdentifier`] / [`GeneratorError::IdentifierCollision`]
///   from planning or declaration
/// - [`GeneratorError::UnknownLookupField`] for lookup fields naming no column
/// - [`GeneratorError::CodeGenError`] if generated tokens fail to parse or the
///   snapshot fails to serialize
///
/// ## Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use airtable_schema_define::{Column, ColumnType, Schema, Table};
/// use airtable_schema_gen::codegen::{EmitOptions, emit};
///
/// let schema = Schema::from_tables([Table::new(
///     "Orders",
///     vec![Column::new("Order Name", ColumnType::Text)],
/// )])
/// .unwrap();
///
/// let artifacts = emit(&schema, &BTreeMap::new(), &EmitOptions::default()).unwrap();
/// assert!(artifacts.get("request.rs").unwrap().contains("pub async fn create_order"));
/// ```
#[instrument(level = "debug", skip_all, fields(tables = schema.len()))]
pub fn emit(
    schema: &Schema,
    metadata: &BTreeMap<String, TableMetadata>,
    options: &EmitOptions,
) -> Result<GeneratedArtifacts, GeneratorError> {
    let plan = SchemaPlan::build(schema, metadata, &options.naming_exceptions)?;

    let files = vec![
        GeneratedFile {
            file_name: SCHEMA_FILE,
            contents: constants::generate_constants(&plan)?.render()?,
        },
        GeneratedFile {
            file_name: BINDINGS_FILE,
            contents: bindings::generate_bindings(&plan, options)?.render()?,
        },
        GeneratedFile {
            file_name: REQUEST_FILE,
            contents: wrapper::generate_wrapper(&plan)?.render()?,
        },
        GeneratedFile {
            file_name: MOD_FILE,
            contents: generate_mod(&plan)?.render()?,
        },
        GeneratedFile {
            file_name: SNAPSHOT_FILE,
            contents: snapshot(schema, metadata)?,
        },
    ];

    debug!(files = files.len(), "Rendered artifacts");
    Ok(GeneratedArtifacts { files })
}

/// Generates `mod.rs`, which ties the three modules together.
pub fn generate_mod(plan: &SchemaPlan<'_>) -> Result<Artifact, GeneratorError> {
    let docs = ModuleDocBuilder::new(plan, ArtifactKind::Root).build();
    let mut artifact = Artifact::new(MOD_FILE, docs);
    artifact.declare("airtable", MOD_FILE, quote! { pub mod airtable; })?;
    artifact.declare("request", MOD_FILE, quote! { pub mod request; })?;
    artifact.declare("schema", MOD_FILE, quote! { pub mod schema; })?;
    Ok(artifact)
}

/// The canonical schema with effective lookup fields, as pretty JSON.
fn snapshot(
    schema: &Schema,
    metadata: &BTreeMap<String, TableMetadata>,
) -> Result<String, GeneratorError> {
    let recorded = apply_metadata(schema.clone(), metadata);
    serde_json::to_string_pretty(&recorded)
        .map(|json| json + "\n")
        .map_err(|e| GeneratorError::CodeGenError(format!("Failed to serialize snapshot: {e}")))
}
