//! Embedded table schemas.
//!
//! Generated constants modules declare one `static` [`TableSchema`] per table.
//! That copy is authoritative at runtime: a field or column missing from it
//! surfaces as a schema mismatch rather than being passed along.

use std::collections::HashMap;
use std::sync::OnceLock;

use strum::Display;

/// How a column's value is shaped in each record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldKind {
    /// Any non-relationship column. Values pass through unchanged.
    Scalar,
    /// Link to at most one record: a bare id in canonical form, a
    /// one-element array on the wire.
    LinkOne,
    /// Link to many records: an array of ids in both forms.
    LinkMany,
}

/// A single column of an embedded table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Canonical field key (e.g. `customerId`).
    pub key: &'static str,
    /// Native Airtable column name (e.g. `Customer`).
    pub name: &'static str,
    /// Native column type as recorded at generation time.
    pub native_type: &'static str,
    /// Value shape used by record conversion.
    pub kind: FieldKind,
}

impl ColumnDescriptor {
    /// Creates a column descriptor. Usable in `const` and `static` items.
    pub const fn new(
        key: &'static str,
        name: &'static str,
        native_type: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            name,
            native_type,
            kind,
        }
    }
}

type ColumnIndex = HashMap<&'static str, &'static ColumnDescriptor>;

/// The embedded schema of one table.
///
/// Lookups by canonical key and by native name are built on first use and
/// reused for the lifetime of the `static`.
///
/// ## Examples
///
/// ```
/// use airtable_schema::{ColumnDescriptor, FieldKind, TableSchema};
///
/// static CUSTOMERS: TableSchema = TableSchema::new(
///     "Customers",
///     &[ColumnDescriptor::new("fullName", "Full Name", "text", FieldKind::Scalar)],
/// );
///
/// assert_eq!(CUSTOMERS.column("fullName").unwrap().name, "Full Name");
/// assert_eq!(CUSTOMERS.column_by_name("Full Name").unwrap().key, "fullName");
/// assert!(CUSTOMERS.column("weight").is_none());
/// ```
#[derive(Debug)]
pub struct TableSchema {
    name: &'static str,
    columns: &'static [ColumnDescriptor],
    by_key: OnceLock<ColumnIndex>,
    by_name: OnceLock<ColumnIndex>,
}

impl TableSchema {
    /// Creates a table schema. Usable in `static` items.
    pub const fn new(name: &'static str, columns: &'static [ColumnDescriptor]) -> Self {
        Self {
            name,
            columns,
            by_key: OnceLock::new(),
            by_name: OnceLock::new(),
        }
    }

    /// Native table name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Columns in generation order.
    pub fn columns(&self) -> &'static [ColumnDescriptor] {
        self.columns
    }

    /// Returns the column with the given canonical key.
    pub fn column(&self, key: &str) -> Option<&'static ColumnDescriptor> {
        self.by_key
            .get_or_init(|| self.columns.iter().map(|c| (c.key, c)).collect())
            .get(key)
            .copied()
    }

    /// Returns the column with the given native name.
    pub fn column_by_name(&self, name: &str) -> Option<&'static ColumnDescriptor> {
        self.by_name
            .get_or_init(|| self.columns.iter().map(|c| (c.name, c)).collect())
            .get(name)
            .copied()
    }
}
