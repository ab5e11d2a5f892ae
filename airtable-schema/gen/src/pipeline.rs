//! End-to-end generation run.
//!
//! Reads `<input>/schemaRaw.json` and the previous `<output>/schema.json`,
//! then normalizes, merges, emits and writes. Every file is rendered before
//! the first write, so an error leaves the output directory untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use airtable_schema_define::Schema;
use tracing::{debug, info, instrument};

use crate::codegen::{SNAPSHOT_FILE, emit};
use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::merge::{effective_metadata, merge_metadata};
use crate::normalize::normalize_str;
use crate::output::write_artifacts;

/// Raw schema file name inside the input directory.
pub const RAW_SCHEMA_FILE: &str = "schemaRaw.json";

const DUMP_SCRIPT: &str = "copy(_.mapValues(application.tablesById, table => _.set(_.omit(table, ['sampleRows']),'columns',_.map(table.columns, item =>_.set(item, 'foreignTable', _.get(item, 'foreignTable.id'))))));";

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of tables generated.
    pub tables: usize,
    /// Files written, in order. Empty for a dry run.
    pub written: Vec<PathBuf>,
    /// Whether a previous snapshot was merged.
    pub merged_snapshot: bool,
}

/// How to produce the raw schema file for `base_id`.
pub fn schema_instructions(base_id: Option<&str>) -> String {
    let base = base_id.unwrap_or("<base id>");
    format!(
        "To dump the schema of your base:\n\
         1. Open https://airtable.com/login?continue=/{base}/api/docs\n\
         2. Run this in the browser console, which copies the schema to the clipboard:\n\n\
         {DUMP_SCRIPT}\n\n\
         3. Paste the result into {RAW_SCHEMA_FILE} in the input directory."
    )
}

/// Reads and normalizes the raw schema in `input_dir`.
///
/// ## Errors
///
/// - [`GeneratorError::SchemaNotFound`] if the file does not exist
/// - [`GeneratorError::ReadError`] if it cannot be read
/// - [`GeneratorError::MalformedSchema`] if it does not normalize
pub fn read_raw_schema(input_dir: &Path, base_id: Option<&str>) -> Result<Schema, GeneratorError> {
    let path = input_dir.join(RAW_SCHEMA_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(GeneratorError::SchemaNotFound {
                path: path.display().to_string(),
                instructions: schema_instructions(base_id),
            });
        }
        Err(e) => {
            return Err(GeneratorError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        }
    };
    normalize_str(&raw).map_err(|e| match e {
        GeneratorError::MalformedSchema { path: at, reason } => {
            GeneratorError::malformed(format!("{}#{at}", path.display()), reason)
        }
        other => other,
    })
}

/// Reads the snapshot left by the previous run, if there is one.
///
/// ## Errors
///
/// Returns [`GeneratorError::ReadError`] if the file exists but cannot be
/// read, and [`GeneratorError::MalformedSchema`] if it is not a valid schema.
pub fn read_snapshot(output_dir: &Path) -> Result<Option<Schema>, GeneratorError> {
    let path = output_dir.join(SNAPSHOT_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(GeneratorError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let shown = path.display().to_string();
    let parsed: Schema = serde_json::from_str(&content)
        .map_err(|e| GeneratorError::malformed(&shown, format!("invalid snapshot: {e}")))?;
    // deserialization does not check for duplicate names
    let schema = Schema::from_tables(parsed.into_tables())
        .map_err(|e| GeneratorError::malformed(&shown, e.to_string()))?;

    debug!(path = %shown, tables = schema.len(), "Read previous snapshot");
    Ok(Some(schema))
}

/// Runs a full generation with `config`.
///
/// ## Errors
///
/// Any [`GeneratorError`]. Nothing is written unless every file rendered.
#[instrument(level = "info", skip(config), fields(input = %config.input.display(), output = %config.output.display()))]
pub fn run(config: &GeneratorConfig, dry_run: bool) -> Result<GenerationReport, GeneratorError> {
    let fresh = read_raw_schema(&config.input, config.base_id.as_deref())?;
    info!(tables = fresh.len(), "Normalized raw schema");

    let previous = read_snapshot(&config.output)?;
    let merged_snapshot = previous.is_some();
    let schema = match previous {
        Some(previous) => merge_metadata(&previous, fresh),
        None => fresh,
    };

    let metadata = effective_metadata(&schema, &config.tables);
    let artifacts = emit(&schema, &metadata, &config.emit_options())?;
    let written = write_artifacts(&artifacts, &config.output, dry_run)?;

    Ok(GenerationReport {
        tables: schema.len(),
        written,
        merged_snapshot,
    })
}
