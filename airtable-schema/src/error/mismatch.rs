//! Reasons a record disagrees with the embedded schema.

use thiserror::Error;

/// Why a field was rejected during record conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MismatchReason {
    /// Canonical key not present in the embedded schema.
    #[error("unknown field")]
    UnknownField,

    /// Native column not present in the embedded schema; the local copy is
    /// older than the base.
    #[error("unknown column (embedded schema is stale)")]
    UnknownColumn,

    /// A single-record link was given an array or `null`.
    #[error("expected a single record id")]
    ExpectedScalar,

    /// A link field was given something other than an array.
    #[error("expected an array of record ids")]
    ExpectedSequence,

    /// A single-record link arrived with the wrong number of ids.
    #[error("expected exactly one linked record, got {len}")]
    ExpectedSingleElement {
        /// Number of ids received.
        len: usize,
    },
}
