//! Native-format operations over a [`RecordService`].
//!
//! These are the functions generated `airtable.rs` modules delegate to. They
//! take native table names and native records, turn collaborator failures
//! into [`AirtableError::Service`] without touching them, and check that
//! every write affected exactly as many records as it sent.

use tracing::{debug, instrument, warn};

use crate::error::{AirtableError, RecordOperation};
use crate::formula;
use crate::record::{Record, RecordId, StoredRecord};
use crate::service::{RecordService, SelectQuery, Sort};

/// Creates one record.
///
/// ## Errors
///
/// - [`AirtableError::Service`] if the service fails
/// - [`AirtableError::RecordCountMismatch`] unless exactly one record comes back
#[instrument(level = "debug", skip(service, fields))]
pub async fn create_record<S: RecordService>(
    service: &S,
    table: &str,
    fields: Record,
) -> Result<StoredRecord, AirtableError> {
    let created = service
        .create(table, vec![fields])
        .await
        .map_err(AirtableError::Service)?;
    expect_one(table, RecordOperation::Create, created)
}

/// Creates a batch of records in a single call.
///
/// Callers keep batches within
/// [`MAX_RECORDS_PER_REQUEST`](crate::MAX_RECORDS_PER_REQUEST). An empty
/// batch issues no call.
///
/// ## Errors
///
/// - [`AirtableError::Service`] if the service fails
/// - [`AirtableError::RecordCountMismatch`] if the number of created records
///   differs from the number sent
#[instrument(level = "debug", skip(service, records), fields(count = records.len()))]
pub async fn create_records<S: RecordService>(
    service: &S,
    table: &str,
    records: Vec<Record>,
) -> Result<Vec<StoredRecord>, AirtableError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let expected = records.len();
    let created = service
        .create(table, records)
        .await
        .map_err(AirtableError::Service)?;
    expect_count(table, RecordOperation::Create, expected, created)
}

/// Fetches one record by id.
///
/// ## Errors
///
/// Returns [`AirtableError::Service`] if the service fails, including when
/// the record does not exist.
#[instrument(level = "debug", skip(service))]
pub async fn find_record<S: RecordService>(
    service: &S,
    table: &str,
    id: &str,
) -> Result<StoredRecord, AirtableError> {
    service
        .find(table, id)
        .await
        .map_err(AirtableError::Service)
}

/// Selects every record matching `query`.
///
/// ## Errors
///
/// Returns [`AirtableError::Service`] if the service fails.
#[instrument(level = "debug", skip(service))]
pub async fn select_records<S: RecordService>(
    service: &S,
    table: &str,
    query: &SelectQuery,
) -> Result<Vec<StoredRecord>, AirtableError> {
    let records = service
        .select(table, query)
        .await
        .map_err(AirtableError::Service)?;
    debug!(count = records.len(), "Selected records");
    Ok(records)
}

/// Selects records whose native `column` equals `value`, narrowed by an
/// optional caller filter.
///
/// No matches is an empty result, not an error.
///
/// ## Errors
///
/// Returns [`AirtableError::Service`] if the service fails.
#[instrument(level = "debug", skip(service, sort))]
pub async fn select_by_attribute<S: RecordService>(
    service: &S,
    table: &str,
    view: &str,
    column: &str,
    value: &str,
    filter: Option<&str>,
    sort: Vec<Sort>,
) -> Result<Vec<StoredRecord>, AirtableError> {
    let query = SelectQuery {
        view: Some(view.to_string()),
        filter_by_formula: Some(formula::and(filter, formula::field_equals(column, value))),
        sort,
    };
    select_records(service, table, &query).await
}

/// Applies a partial update to one record.
///
/// ## Errors
///
/// - [`AirtableError::Service`] if the service fails
/// - [`AirtableError::RecordCountMismatch`] unless exactly one record comes back
#[instrument(level = "debug", skip(service, fields))]
pub async fn update_record<S: RecordService>(
    service: &S,
    table: &str,
    id: &str,
    fields: Record,
) -> Result<StoredRecord, AirtableError> {
    let updated = service
        .update(table, vec![(id.to_string(), fields)])
        .await
        .map_err(AirtableError::Service)?;
    expect_one(table, RecordOperation::Update, updated)
}

/// Applies partial updates to a batch of records in a single call.
///
/// ## Errors
///
/// - [`AirtableError::Service`] if the service fails
/// - [`AirtableError::RecordCountMismatch`] if the number of updated records
///   differs from the number sent
#[instrument(level = "debug", skip(service, updates), fields(count = updates.len()))]
pub async fn update_records<S: RecordService>(
    service: &S,
    table: &str,
    updates: Vec<(RecordId, Record)>,
) -> Result<Vec<StoredRecord>, AirtableError> {
    if updates.is_empty() {
        return Ok(Vec::new());
    }
    let expected = updates.len();
    let updated = service
        .update(table, updates)
        .await
        .map_err(AirtableError::Service)?;
    expect_count(table, RecordOperation::Update, expected, updated)
}

/// Deletes one record and returns the id Airtable reports as deleted.
///
/// ## Errors
///
/// - [`AirtableError::Service`] if the service fails
/// - [`AirtableError::RecordCountMismatch`] unless exactly one id comes back
#[instrument(level = "debug", skip(service))]
pub async fn delete_record<S: RecordService>(
    service: &S,
    table: &str,
    id: &str,
) -> Result<RecordId, AirtableError> {
    let deleted = service
        .destroy(table, vec![id.to_string()])
        .await
        .map_err(AirtableError::Service)?;
    expect_one(table, RecordOperation::Delete, deleted)
}

fn expect_one<T>(
    table: &str,
    operation: RecordOperation,
    items: Vec<T>,
) -> Result<T, AirtableError> {
    let actual = items.len();
    match <[T; 1]>::try_from(items) {
        Ok([item]) => Ok(item),
        Err(_) => Err(count_mismatch(table, operation, 1, actual)),
    }
}

fn expect_count<T>(
    table: &str,
    operation: RecordOperation,
    expected: usize,
    items: Vec<T>,
) -> Result<Vec<T>, AirtableError> {
    if items.len() == expected {
        Ok(items)
    } else {
        Err(count_mismatch(table, operation, expected, items.len()))
    }
}

fn count_mismatch(
    table: &str,
    operation: RecordOperation,
    expected: usize,
    actual: usize,
) -> AirtableError {
    warn!(table, %operation, expected, actual, "Airtable returned an unexpected record count");
    AirtableError::RecordCountMismatch {
        table: table.to_string(),
        operation,
        expected,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_one_takes_the_single_item() {
        assert_eq!(
            expect_one("Orders", RecordOperation::Create, vec![7]).unwrap(),
            7
        );
    }

    #[test]
    fn expect_one_rejects_zero_and_two() {
        for items in [vec![], vec![1, 2]] {
            let actual = items.len();
            match expect_one("Orders", RecordOperation::Delete, items) {
                Err(AirtableError::RecordCountMismatch {
                    expected, actual: a, ..
                }) => {
                    assert_eq!(expected, 1);
                    assert_eq!(a, actual);
                }
                other => panic!("expected count mismatch, got {other:?}"),
            }
        }
    }

    #[test]
    fn expect_count_checks_length() {
        assert!(expect_count("Orders", RecordOperation::Update, 2, vec![1, 2]).is_ok());
        assert!(
            expect_count("Orders", RecordOperation::Update, 3, vec![1, 2])
                .unwrap_err()
                .is_count_mismatch()
        );
    }
}
