//! Record value types shared by both record formats.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record's fields, keyed by canonical key or native column name
/// depending on which side of the conversion it sits.
pub type Record = Map<String, Value>;

/// Airtable record id (`rec…`).
pub type RecordId = String;

/// A record together with its id, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Record id.
    pub id: RecordId,
    /// Record fields.
    pub fields: Record,
}

impl StoredRecord {
    /// Creates a stored record.
    pub fn new(id: impl Into<RecordId>, fields: Record) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}
