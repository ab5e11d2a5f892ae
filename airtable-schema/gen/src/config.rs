//! Generator configuration.
//!
//! Read from `airtable-schema.toml` by default. Every field is optional and
//! unknown fields are ignored.
//!
//! ```toml
//! base_id = "appXXXXXXXXXXXXXX"
//! input = "input"
//! output = "src/airtable"
//! default_view = "Grid view"
//!
//! [naming_exceptions]
//! pluralize = ["Staff"]
//! depluralize = ["Status"]
//!
//! [tables."Orders"]
//! lookup_fields = ["Order Name"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use airtable_schema_define::{NamingExceptions, TableMetadata};
use serde::Deserialize;
use tracing::{debug, info};

use crate::codegen::EmitOptions;
use crate::errors::GeneratorError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "airtable-schema.toml";

/// View used by generated select queries unless configured.
pub const DEFAULT_VIEW: &str = "Grid view";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Airtable base id, used for the schema-dump instructions and emitted
    /// as `BASE_ID`.
    pub base_id: Option<String>,
    /// Directory holding `schemaRaw.json`.
    pub input: PathBuf,
    /// Directory the generated modules are written to.
    pub output: PathBuf,
    /// View passed to every select query.
    pub default_view: String,
    /// Names that bypass the trailing-`s` plural heuristic.
    pub naming_exceptions: NamingExceptions,
    /// Per-table metadata keyed by native table name.
    pub tables: BTreeMap<String, TableMetadata>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_id: None,
            input: PathBuf::from("input"),
            output: PathBuf::from("output"),
            default_view: DEFAULT_VIEW.to_string(),
            naming_exceptions: NamingExceptions::default(),
            tables: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigError`] if `content` is not valid
    /// TOML or a field has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, GeneratorError> {
        toml::from_str(content).map_err(|e| GeneratorError::ConfigError(e.to_string()))
    }

    /// Reads a TOML configuration file.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ReadError`] if the file cannot be read and
    /// [`GeneratorError::ConfigError`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), tables = config.tables.len(), "Loaded configuration");
        Ok(config)
    }

    /// Loads `explicit` if given, otherwise [`DEFAULT_CONFIG_FILE`] when it
    /// exists, otherwise the defaults.
    ///
    /// ## Errors
    ///
    /// Fails like [`GeneratorConfig::load`]; an explicit path that does not
    /// exist is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, GeneratorError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    info!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Options handed to the emitter.
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            naming_exceptions: self.naming_exceptions.clone(),
            default_view: self.default_view.clone(),
            base_id: self.base_id.clone(),
        }
    }
}
