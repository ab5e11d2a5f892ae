//! Carrying curated metadata across regenerations.
//!
//! Each run writes the canonical schema to `schema.json`. The next run merges
//! the freshly normalized schema with that snapshot so hand-edited
//! `lookupFields` are not lost when the base is re-dumped.

use std::collections::BTreeMap;

use airtable_schema_define::{Schema, Table, TableMetadata};
use tracing::{debug, warn};

/// Merges the previous snapshot's lookup fields into a fresh schema.
///
/// Fresh tables, columns and their order win. A fresh table keeps the
/// `lookupFields` of the previous table with the same native name, minus
/// any whose column no longer exists. Tables missing from `fresh` are gone.
///
/// ## Examples
///
/// ```
/// use airtable_schema_define::{Column, ColumnType, Schema, Table};
/// use airtable_schema_gen::merge::merge_metadata;
///
/// let mut orders = Table::new("Orders", vec![Column::new("Order Name", ColumnType::Text)]);
/// orders.lookup_fields = vec!["Order Name".to_string()];
/// let previous = Schema::from_tables([orders]).unwrap();
///
/// let fresh = Schema::from_tables([Table::new(
///     "Orders",
///     vec![
///         Column::new("Order Name", ColumnType::Text),
///         Column::new("Total", ColumnType::Number),
///     ],
/// )])
/// .unwrap();
///
/// let merged = merge_metadata(&previous, fresh);
/// let orders = merged.table("Orders").unwrap();
/// assert_eq!(orders.columns.len(), 2);
/// assert_eq!(orders.lookup_fields, ["Order Name"]);
/// ```
pub fn merge_metadata(previous: &Schema, fresh: Schema) -> Schema {
    let tables = fresh.into_tables().into_iter().map(|mut table| {
        if let Some(old) = previous.table(&table.name) {
            table.lookup_fields = surviving_lookup_fields(old, &table);
        }
        table
    });

    let mut merged = Schema::default();
    for table in tables {
        // names were unique in `fresh`
        if let Err(e) = merged.push(table) {
            warn!(error = %e, "Skipping table during merge");
        }
    }
    merged
}

fn surviving_lookup_fields(old: &Table, fresh: &Table) -> Vec<String> {
    let mut fields = fresh.lookup_fields.clone();
    for field in &old.lookup_fields {
        if fields.contains(field) {
            continue;
        }
        if fresh.column(field).is_some() {
            fields.push(field.clone());
        } else {
            warn!(
                table = %fresh.name,
                field = %field,
                "Dropping lookup field; column no longer exists"
            );
        }
    }
    fields
}

/// Effective per-table metadata for emission.
///
/// Configured lookup fields come first, in configured order, followed by
/// the merged snapshot's fields that were not already configured. Tables with
/// neither get no entry.
pub fn effective_metadata(
    schema: &Schema,
    configured: &BTreeMap<String, TableMetadata>,
) -> BTreeMap<String, TableMetadata> {
    let mut effective = BTreeMap::new();
    for table in schema.tables() {
        let mut fields = configured
            .get(&table.name)
            .map(|meta| meta.lookup_fields.clone())
            .unwrap_or_default();
        for field in &table.lookup_fields {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }
        if !fields.is_empty() {
            debug!(table = %table.name, lookup_fields = ?fields, "Effective lookup fields");
            effective.insert(table.name.clone(), TableMetadata::with_lookup_fields(fields));
        }
    }
    for name in configured.keys() {
        if schema.table(name).is_none() {
            warn!(table = %name, "Configured table is not in the schema");
        }
    }
    effective
}

/// Copies effective lookup fields onto the schema so the snapshot records them.
pub fn apply_metadata(schema: Schema, metadata: &BTreeMap<String, TableMetadata>) -> Schema {
    let mut applied = Schema::default();
    for mut table in schema.into_tables() {
        if let Some(meta) = metadata.get(&table.name) {
            table.lookup_fields = meta.lookup_fields.clone();
        }
        if let Err(e) = applied.push(table) {
            warn!(error = %e, "Skipping table while applying metadata");
        }
    }
    applied
}
