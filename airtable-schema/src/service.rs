//! The record-storage collaborator.
//!
//! [`RecordService`] is the narrow interface generated bindings call. It
//! speaks native column names only and knows nothing about canonical keys.
//! Retries, timeouts and pagination belong to the implementation.

use std::future::Future;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::record::{Record, RecordId, StoredRecord};

/// Error type returned by [`RecordService`] implementations.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// Sort direction for select queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort by. Canonical key at the wrapper layer, native column
    /// name once it reaches the service.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Parameters of a select call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    /// View to read through.
    pub view: Option<String>,
    /// Airtable formula restricting the result.
    pub filter_by_formula: Option<String>,
    /// Sort keys, native column names.
    pub sort: Vec<Sort>,
}

/// Native-format access to an Airtable base.
///
/// ## Examples
///
/// ```rust,ignore
/// struct HttpService { client: reqwest::Client, base_id: String }
///
/// impl RecordService for HttpService {
///     async fn create(&self, table: &str, records: Vec<Record>) -> Result<Vec<StoredRecord>, ServiceError> {
///         // POST /v0/{base_id}/{table} with { records: [{ fields }] }
///     }
///     // ...
/// }
/// ```
pub trait RecordService: Send + Sync {
    /// Creates records and returns them as stored.
    fn create(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> impl Future<Output = Result<Vec<StoredRecord>, ServiceError>> + Send;

    /// Fetches a single record.
    fn find(
        &self,
        table: &str,
        id: &str,
    ) -> impl Future<Output = Result<StoredRecord, ServiceError>> + Send;

    /// Selects records, following pagination to the last page.
    fn select(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> impl Future<Output = Result<Vec<StoredRecord>, ServiceError>> + Send;

    /// Applies partial updates and returns the updated records.
    fn update(
        &self,
        table: &str,
        updates: Vec<(RecordId, Record)>,
    ) -> impl Future<Output = Result<Vec<StoredRecord>, ServiceError>> + Send;

    /// Deletes records and returns the ids Airtable reports as deleted.
    fn destroy(
        &self,
        table: &str,
        ids: Vec<RecordId>,
    ) -> impl Future<Output = Result<Vec<RecordId>, ServiceError>> + Send;
}
