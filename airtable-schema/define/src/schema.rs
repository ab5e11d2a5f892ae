//! Tables and the ordered schema that holds them.
//!
//! Table order is insertion order from the source payload and decides the
//! order of generated items, so [`Schema`] keeps tables in a `Vec` rather
//! than a map.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::column::Column;

/// Errors raised while assembling a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two tables share a native name.
    #[error("Duplicate table name: '{0}'")]
    DuplicateTable(String),
}

/// A single Airtable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Native table name, used verbatim on the wire.
    pub name: String,
    /// Columns in source order.
    pub columns: Vec<Column>,
    /// Native column names that get a "find by attribute" accessor.
    ///
    /// Curated by hand in the schema snapshot and carried across regeneration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lookup_fields: Vec<String>,
}

impl Table {
    /// Creates a table with no lookup fields.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            lookup_fields: Vec::new(),
        }
    }

    /// Returns the column with the given native name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Canonical schema: tables keyed by native name, in insertion order.
///
/// ## Examples
///
/// ```
/// use airtable_schema_define::{Schema, SchemaError, Table};
///
/// let mut schema = Schema::default();
/// schema.push(Table::new("Orders", vec![])).unwrap();
///
/// let err = schema.push(Table::new("Orders", vec![])).unwrap_err();
/// assert_eq!(err, SchemaError::DuplicateTable("Orders".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    /// Builds a schema from tables, rejecting duplicate names.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::DuplicateTable`] on the first repeated name.
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Result<Self, SchemaError> {
        let mut schema = Self::default();
        for table in tables {
            schema.push(table)?;
        }
        Ok(schema)
    }

    /// Appends a table.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::DuplicateTable`] if a table with the same
    /// native name already exists.
    pub fn push(&mut self, table: Table) -> Result<(), SchemaError> {
        if self.table(&table.name).is_some() {
            return Err(SchemaError::DuplicateTable(table.name));
        }
        self.tables.push(table);
        Ok(())
    }

    /// Returns the table with the given native name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Iterates tables in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Consumes the schema, returning its tables in order.
    pub fn into_tables(self) -> Vec<Table> {
        self.tables
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the schema has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn orders() -> Table {
        Table::new(
            "Orders",
            vec![
                Column::new("Order Name", ColumnType::Text),
                Column::new("Customer", ColumnType::ForeignKeyOne),
            ],
        )
    }

    #[test]
    fn preserves_insertion_order() {
        let schema = Schema::from_tables([
            Table::new("Zebras", vec![]),
            orders(),
            Table::new("Apples", vec![]),
        ])
        .unwrap();

        let names: Vec<_> = schema.tables().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Zebras", "Orders", "Apples"]);
    }

    #[test]
    fn rejects_duplicate_tables() {
        let result = Schema::from_tables([orders(), orders()]);
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateTable("Orders".to_string())
        );
    }

    #[test]
    fn column_lookup_by_native_name() {
        let table = orders();
        assert_eq!(
            table.column("Customer").map(|c| &c.column_type),
            Some(&ColumnType::ForeignKeyOne)
        );
        assert!(table.column("customer").is_none());
    }

    #[test]
    fn serializes_tables_as_ordered_list() {
        let mut table = orders();
        table.lookup_fields = vec!["Order Name".to_string()];
        let schema = Schema::from_tables([table, Table::new("Customers", vec![])]).unwrap();

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["tables"][0]["name"], "Orders");
        assert_eq!(json["tables"][0]["lookupFields"][0], "Order Name");
        assert_eq!(json["tables"][1]["name"], "Customers");
        assert!(json["tables"][1].get("lookupFields").is_none());

        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}
