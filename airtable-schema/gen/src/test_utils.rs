//! Shared test fixtures for airtable-schema-gen tests.

use std::collections::BTreeMap;

use airtable_schema_define::{Column, ColumnType, Schema, Table, TableMetadata};

/// Orders, Customers and Line Items, linked to each other.
///
/// - `Orders`: `Order Name` (text), `Customer` (one, to Customers),
///   `Line Items` (many, to Line Items), `Total` (number)
/// - `Customers`: `Full Name` (text)
/// - `Line Items`: `SKU` (text), `Order` (one, to Orders)
pub fn orders_schema() -> Schema {
    Schema::from_tables([
        Table::new(
            "Orders",
            vec![
                Column::new("Order Name", ColumnType::Text),
                Column::new("Customer", ColumnType::ForeignKeyOne).linked_to("Customers"),
                Column::new("Line Items", ColumnType::ForeignKeyMany).linked_to("Line Items"),
                Column::new("Total", ColumnType::Number),
            ],
        ),
        Table::new("Customers", vec![Column::new("Full Name", ColumnType::Text)]),
        Table::new(
            "Line Items",
            vec![
                Column::new("SKU", ColumnType::Text),
                Column::new("Order", ColumnType::ForeignKeyOne).linked_to("Orders"),
            ],
        ),
    ])
    .expect("fixture tables are unique")
}

/// `Orders` looked up by `Order Name`.
pub fn orders_metadata() -> BTreeMap<String, TableMetadata> {
    BTreeMap::from([(
        "Orders".to_string(),
        TableMetadata::with_lookup_fields(["Order Name"]),
    )])
}
