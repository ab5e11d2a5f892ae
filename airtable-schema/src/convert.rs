//! Record format conversion.
//!
//! Canonical records are keyed by generated field keys (`customerId`);
//! native records by Airtable column names (`Customer`). Airtable represents
//! every link field as an array, so single-record links are wrapped on the
//! way out and unwrapped on the way in. A single-record link always carries
//! exactly one id, in both forms. Anything the embedded schema does not
//! describe is a [`AirtableError::SchemaMismatch`], never dropped.

use serde_json::Value;

use crate::error::{AirtableError, MismatchReason};
use crate::record::{Record, StoredRecord};
use crate::schema::{FieldKind, TableSchema};
use crate::service::Sort;

/// Converts a canonical record into Airtable's native format.
///
/// ## Errors
///
/// Returns [`AirtableError::SchemaMismatch`] when:
/// - a key is not a canonical field of `table` ([`MismatchReason::UnknownField`])
/// - a single-record link holds an array or `null` ([`MismatchReason::ExpectedScalar`])
/// - a multi-record link holds a non-array ([`MismatchReason::ExpectedSequence`])
///
/// ## Examples
///
/// ```
/// use airtable_schema::{ColumnDescriptor, FieldKind, TableSchema, to_service_format};
/// use serde_json::json;
///
/// static ORDERS: TableSchema = TableSchema::new(
///     "Orders",
///     &[ColumnDescriptor::new("customerId", "Customer", "foreignKey-one", FieldKind::LinkOne)],
/// );
///
/// let record = json!({ "customerId": "rec123" }).as_object().unwrap().clone();
/// let native = to_service_format(&ORDERS, record).unwrap();
/// assert_eq!(native["Customer"], json!(["rec123"]));
///
/// let unknown = json!({ "weight": 3 }).as_object().unwrap().clone();
/// assert!(to_service_format(&ORDERS, unknown).unwrap_err().is_schema_mismatch());
/// ```
pub fn to_service_format(table: &TableSchema, record: Record) -> Result<Record, AirtableError> {
    let mut native = Record::new();
    for (key, value) in record {
        let Some(column) = table.column(&key) else {
            return Err(AirtableError::mismatch(
                table.name(),
                key,
                MismatchReason::UnknownField,
            ));
        };

        let value = match (column.kind, value) {
            (FieldKind::Scalar, value) => value,
            (FieldKind::LinkOne, Value::Array(_) | Value::Null) => {
                return Err(AirtableError::mismatch(
                    table.name(),
                    key,
                    MismatchReason::ExpectedScalar,
                ));
            }
            (FieldKind::LinkOne, value) => Value::Array(vec![value]),
            (FieldKind::LinkMany, value @ (Value::Array(_) | Value::Null)) => value,
            (FieldKind::LinkMany, _) => {
                return Err(AirtableError::mismatch(
                    table.name(),
                    key,
                    MismatchReason::ExpectedSequence,
                ));
            }
        };

        native.insert(column.name.to_string(), value);
    }
    Ok(native)
}

/// Converts a native Airtable record into canonical form.
///
/// ## Errors
///
/// Returns [`AirtableError::SchemaMismatch`] when:
/// - a column is not in the embedded schema ([`MismatchReason::UnknownColumn`])
/// - a link is neither an array nor `null` ([`MismatchReason::ExpectedSequence`])
/// - a single-record link array does not hold exactly one id
///   ([`MismatchReason::ExpectedSingleElement`])
pub fn from_service_format(table: &TableSchema, record: Record) -> Result<Record, AirtableError> {
    let mut canonical = Record::new();
    for (name, value) in record {
        let Some(column) = table.column_by_name(&name) else {
            return Err(AirtableError::mismatch(
                table.name(),
                name,
                MismatchReason::UnknownColumn,
            ));
        };

        let value = match (column.kind, value) {
            (FieldKind::LinkOne, Value::Array(items)) => {
                let len = items.len();
                match <[Value; 1]>::try_from(items) {
                    Ok([id]) => id,
                    Err(_) => {
                        return Err(AirtableError::mismatch(
                            table.name(),
                            name,
                            MismatchReason::ExpectedSingleElement { len },
                        ));
                    }
                }
            }
            (FieldKind::LinkMany, value @ (Value::Array(_) | Value::Null)) => value,
            (FieldKind::LinkOne | FieldKind::LinkMany, _) => {
                return Err(AirtableError::mismatch(
                    table.name(),
                    name,
                    MismatchReason::ExpectedSequence,
                ));
            }
            (FieldKind::Scalar, value) => value,
        };

        canonical.insert(column.key.to_string(), value);
    }
    Ok(canonical)
}

/// Converts the fields of a stored record into canonical form.
///
/// ## Errors
///
/// See [`from_service_format`].
pub fn from_service_record(
    table: &TableSchema,
    record: StoredRecord,
) -> Result<StoredRecord, AirtableError> {
    Ok(StoredRecord {
        id: record.id,
        fields: from_service_format(table, record.fields)?,
    })
}

/// Converts a list of stored records into canonical form, failing on the
/// first mismatch.
///
/// ## Errors
///
/// See [`from_service_format`].
pub fn from_service_records(
    table: &TableSchema,
    records: Vec<StoredRecord>,
) -> Result<Vec<StoredRecord>, AirtableError> {
    records
        .into_iter()
        .map(|record| from_service_record(table, record))
        .collect()
}

/// Rewrites canonical sort keys to native column names.
///
/// ## Errors
///
/// Returns [`AirtableError::SchemaMismatch`] with
/// [`MismatchReason::UnknownField`] for keys not in `table`.
pub fn sort_to_service(table: &TableSchema, sort: &[Sort]) -> Result<Vec<Sort>, AirtableError> {
    sort.iter()
        .map(|s| {
            table
                .column(&s.field)
                .map(|column| Sort {
                    field: column.name.to_string(),
                    direction: s.direction,
                })
                .ok_or_else(|| {
                    AirtableError::mismatch(table.name(), &s.field, MismatchReason::UnknownField)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;
    use crate::service::SortDirection;
    use proptest::prelude::*;
    use serde_json::json;

    static ORDERS: TableSchema = TableSchema::new(
        "Orders",
        &[
            ColumnDescriptor::new("orderName", "Order Name", "text", FieldKind::Scalar),
            ColumnDescriptor::new("customerId", "Customer", "foreignKey-one", FieldKind::LinkOne),
            ColumnDescriptor::new(
                "lineItemIds",
                "Line Items",
                "foreignKey-many",
                FieldKind::LinkMany,
            ),
            ColumnDescriptor::new("total", "Total", "number", FieldKind::Scalar),
        ],
    );

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn reason(err: AirtableError) -> (String, String, MismatchReason) {
        match err {
            AirtableError::SchemaMismatch {
                table,
                field,
                reason,
            } => (table, field, reason),
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn orders_scenario_wraps_customer_link() {
        let native = to_service_format(
            &ORDERS,
            record(json!({ "orderName": "A1", "customerId": "rec123" })),
        )
        .unwrap();

        assert_eq!(
            Value::Object(native),
            json!({ "Order Name": "A1", "Customer": ["rec123"] })
        );
    }

    #[test]
    fn unknown_field_names_field_and_table() {
        let err = to_service_format(&ORDERS, record(json!({ "weight": 12 }))).unwrap_err();
        assert_eq!(
            reason(err),
            (
                "Orders".to_string(),
                "weight".to_string(),
                MismatchReason::UnknownField
            )
        );
    }

    #[test]
    fn null_single_link_is_rejected() {
        let canonical = record(json!({ "orderName": "A1", "customerId": null }));
        let err = to_service_format(&ORDERS, canonical).unwrap_err();
        assert_eq!(
            reason(err),
            (
                "Orders".to_string(),
                "customerId".to_string(),
                MismatchReason::ExpectedScalar
            )
        );
    }

    #[test]
    fn array_for_single_link_is_rejected() {
        let err =
            to_service_format(&ORDERS, record(json!({ "customerId": ["rec1"] }))).unwrap_err();
        assert_eq!(reason(err).2, MismatchReason::ExpectedScalar);
    }

    #[test]
    fn scalar_for_multi_link_is_rejected() {
        let err =
            to_service_format(&ORDERS, record(json!({ "lineItemIds": "rec1" }))).unwrap_err();
        assert_eq!(reason(err).2, MismatchReason::ExpectedSequence);
    }

    #[test]
    fn multi_link_stays_an_array_both_ways() {
        let canonical = record(json!({ "lineItemIds": ["rec1", "rec2"] }));
        let native = to_service_format(&ORDERS, canonical.clone()).unwrap();
        assert_eq!(native["Line Items"], json!(["rec1", "rec2"]));
        assert_eq!(from_service_format(&ORDERS, native).unwrap(), canonical);
    }

    #[test]
    fn unknown_native_column_is_stale_schema() {
        let err = from_service_format(&ORDERS, record(json!({ "Discount": 5 }))).unwrap_err();
        assert_eq!(
            reason(err),
            (
                "Orders".to_string(),
                "Discount".to_string(),
                MismatchReason::UnknownColumn
            )
        );
    }

    #[test]
    fn single_link_with_two_ids_is_not_coerced() {
        let err =
            from_service_format(&ORDERS, record(json!({ "Customer": ["rec1", "rec2"] })))
                .unwrap_err();
        assert_eq!(
            reason(err).2,
            MismatchReason::ExpectedSingleElement { len: 2 }
        );
    }

    #[test]
    fn single_link_with_no_ids_is_not_coerced() {
        let err = from_service_format(&ORDERS, record(json!({ "Customer": [] }))).unwrap_err();
        assert_eq!(
            reason(err).2,
            MismatchReason::ExpectedSingleElement { len: 0 }
        );
    }

    #[test]
    fn single_link_must_be_an_array_in_native_form() {
        let err =
            from_service_format(&ORDERS, record(json!({ "Customer": "rec1" }))).unwrap_err();
        assert_eq!(reason(err).2, MismatchReason::ExpectedSequence);
    }

    #[test]
    fn multi_link_must_be_an_array_in_native_form() {
        let err =
            from_service_format(&ORDERS, record(json!({ "Line Items": "rec1" }))).unwrap_err();
        assert_eq!(
            reason(err),
            (
                "Orders".to_string(),
                "Line Items".to_string(),
                MismatchReason::ExpectedSequence
            )
        );

        let cleared =
            from_service_format(&ORDERS, record(json!({ "Line Items": null }))).unwrap();
        assert_eq!(cleared["lineItemIds"], Value::Null);
    }

    #[test]
    fn stored_record_keeps_its_id() {
        let stored = StoredRecord::new("recA", record(json!({ "Total": 9.5 })));
        let converted = from_service_record(&ORDERS, stored).unwrap();
        assert_eq!(converted.id, "recA");
        assert_eq!(converted.fields["total"], json!(9.5));
    }

    #[test]
    fn sort_keys_are_translated() {
        let sort = sort_to_service(&ORDERS, &[Sort::desc("orderName")]).unwrap();
        assert_eq!(sort[0].field, "Order Name");
        assert_eq!(sort[0].direction, SortDirection::Desc);

        let err = sort_to_service(&ORDERS, &[Sort::asc("Order Name")]).unwrap_err();
        assert!(err.is_schema_mismatch());
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        ]
    }

    fn link_ids() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            prop::collection::vec("rec[a-zA-Z0-9]{6}", 0..5).prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn round_trip_restores_canonical_record(
            name in prop_oneof![Just(Value::Null), scalar()],
            total in prop_oneof![Just(Value::Null), scalar()],
            customer in prop_oneof![
                Just(Value::Null),
                "rec[a-zA-Z0-9]{6}".prop_map(Value::from),
            ],
            items in link_ids(),
        ) {
            let canonical = record(json!({
                "orderName": name,
                "customerId": customer,
                "lineItemIds": items,
                "total": total,
            }));

            match to_service_format(&ORDERS, canonical.clone()) {
                Ok(native) => {
                    prop_assert!(native["Customer"].as_array().is_some_and(|a| a.len() == 1));
                    prop_assert_eq!(from_service_format(&ORDERS, native).unwrap(), canonical);
                }
                Err(err) => {
                    prop_assert!(customer.is_null());
                    prop_assert_eq!(reason(err).2, MismatchReason::ExpectedScalar);
                }
            }
        }
    }
}
