//! Convenient re-exports for working with the canonical schema model.
//!
//! ## Examples
//!
//! ```
//! use airtable_schema_define::prelude::*;
//!
//! let table = Table::new("Customers", vec![Column::new("Name", ColumnType::Text)]);
//! let exceptions = NamingExceptions::default();
//!
//! assert_eq!(table.columns.len(), 1);
//! assert!(exceptions.pluralize.is_empty());
//! ```

pub use crate::column::{Cardinality, Column, ColumnType};
pub use crate::metadata::{NamingExceptions, TableMetadata};
pub use crate::schema::{Schema, SchemaError, Table};
