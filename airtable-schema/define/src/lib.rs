//! Airtable Schema Definition Library
//!
//! This crate provides the canonical model an Airtable base is normalized
//! into before code generation. The `airtable-schema-gen` binary consumes
//! these types to produce typed CRUD modules.
//!
//! ## Core Types
//!
//! - [`Schema`] - Ordered collection of tables, unique by native name
//! - [`Table`] - A single table with its ordered columns and curated lookup fields
//! - [`Column`] - A column's native name and flattened type
//! - [`ColumnType`] - Flat column type enumeration (foreign keys carry cardinality)
//! - [`Cardinality`] - Whether a foreign key links one or many records
//! - [`NamingExceptions`] - Names that bypass the trailing-`s` plural heuristic
//! - [`TableMetadata`] - Per-table generation hints (lookup fields)
//!
//! ## Examples
//!
//! ```
//! use airtable_schema_define::{Column, ColumnType, Schema, Table};
//!
//! let mut schema = Schema::default();
//! schema
//!     .push(Table::new(
//!         "Orders",
//!         vec![
//!             Column::new("Order Name", ColumnType::Text),
//!             Column::new("Customer", ColumnType::ForeignKeyOne),
//!         ],
//!     ))
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 1);
//! assert!(schema.table("Orders").unwrap().columns[1].is_foreign_key());
//! ```

pub mod column;
pub mod metadata;
pub mod prelude;
pub mod schema;

pub use column::{Cardinality, Column, ColumnType};
pub use metadata::{NamingExceptions, TableMetadata};
pub use schema::{Schema, SchemaError, Table};
