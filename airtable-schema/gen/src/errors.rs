//! Error types for the Airtable schema generator.

use thiserror::Error;

/// Errors that can occur while normalizing a schema or generating code.
///
/// Every variant is fatal: generation stops and nothing is written.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The raw schema payload is missing a required structural field.
    #[error("Malformed schema at '{path}': {reason}")]
    MalformedSchema {
        /// JSON-pointer-like location of the problem (e.g. `/tbl123/columns/2/type`).
        path: String,
        /// What is wrong at that location.
        reason: String,
    },

    /// Two distinct native names derive the same identifier within one namespace.
    #[error(
        "Identifier collision in {namespace}: '{first}' and '{second}' both map to '{identifier}'"
    )]
    IdentifierCollision {
        /// Where the collision happened (e.g. `columns of table 'Orders'`).
        namespace: String,
        /// The identifier both names produce.
        identifier: String,
        /// The first native name.
        first: String,
        /// The second native name.
        second: String,
    },

    /// A native name reduces to nothing once stripped.
    #[error("Name '{name}' in {namespace} produces an empty identifier")]
    EmptyIdentifier {
        /// Where the name appears.
        namespace: String,
        /// The native name.
        name: String,
    },

    /// A configured lookup field names no column of its table.
    #[error("Lookup field '{field}' is not a column of table '{table}'")]
    UnknownLookupField {
        /// Native table name.
        table: String,
        /// Native column name that was requested.
        field: String,
    },

    /// The raw schema file is absent.
    #[error("Raw schema not found at '{path}'.\n\n{instructions}")]
    SchemaNotFound {
        /// Expected location of the raw schema.
        path: String,
        /// How to produce the file.
        instructions: String,
    },

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),
}

impl GeneratorError {
    /// Builds a [`GeneratorError::MalformedSchema`].
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
