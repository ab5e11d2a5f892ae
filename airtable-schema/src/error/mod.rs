//! Error types for generated Airtable modules.
//!
//! Every failure a generated wrapper can report is an [`AirtableError`]:
//!
//! - [`AirtableError::SchemaMismatch`] - the embedded schema and a record disagree
//! - [`AirtableError::RecordCountMismatch`] - Airtable affected a different number
//!   of records than requested
//! - [`AirtableError::Service`] - the [`RecordService`](crate::RecordService)
//!   failed; the original error is kept as the source

mod mismatch;

pub use mismatch::MismatchReason;

use strum::Display;
use thiserror::Error;

use crate::service::ServiceError;

/// Write operations whose affected-record count is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RecordOperation {
    /// Record creation.
    Create,
    /// Record update.
    Update,
    /// Record deletion.
    Delete,
}

/// Errors raised by generated bindings and wrappers.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// A canonical field or native column is absent from, or shaped
    /// differently than, the embedded schema.
    #[error("Schema mismatch in table '{table}' for field '{field}': {reason}")]
    SchemaMismatch {
        /// Native table name.
        table: String,
        /// Offending canonical key or native column name.
        field: String,
        /// What went wrong.
        reason: MismatchReason,
    },

    /// Airtable reported a different number of affected records than requested.
    #[error("{operation} on table '{table}' returned {actual} record(s), expected {expected}")]
    RecordCountMismatch {
        /// Native table name.
        table: String,
        /// The write that was issued.
        operation: RecordOperation,
        /// Number of records sent.
        expected: usize,
        /// Number of records Airtable reported.
        actual: usize,
    },

    /// The record service failed. Passed through unmodified.
    #[error("Airtable request failed: {0}")]
    Service(#[source] ServiceError),
}

impl AirtableError {
    /// Builds a [`AirtableError::SchemaMismatch`].
    pub fn mismatch(
        table: impl Into<String>,
        field: impl Into<String>,
        reason: MismatchReason,
    ) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            field: field.into(),
            reason,
        }
    }

    /// Returns `true` if this is a schema mismatch.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaMismatch { .. })
    }

    /// Returns `true` if this is a record count mismatch.
    pub fn is_count_mismatch(&self) -> bool {
        matches!(self, Self::RecordCountMismatch { .. })
    }

    /// Returns `true` if the record service failed.
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}
