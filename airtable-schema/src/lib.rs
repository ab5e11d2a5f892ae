//! Runtime support for generated Airtable CRUD modules.
//!
//! `airtable-schema-gen` emits three modules per base: table and column
//! constants, low-level bindings, and a high-level wrapper. All of them lean
//! on this crate at call time.
//!
//! ## Features
//!
//! - **Embedded schema**: [`TableSchema`] and [`ColumnDescriptor`] describe each
//!   table as `static` data, with lazily built lookups by canonical key and by
//!   native name
//! - **Record conversion**: [`to_service_format`] / [`from_service_format`] map
//!   between canonical keys and Airtable column names, wrapping and unwrapping
//!   single-record links
//! - **Batching**: [`in_batches`] splits writes into groups of
//!   [`MAX_RECORDS_PER_REQUEST`] and runs them concurrently
//! - **Formulas**: [`formula`] builds `filterByFormula` expressions
//! - **Bindings**: [`bindings`] wraps a [`RecordService`] with record-count
//!   checks and the [`AirtableError`] taxonomy
//!
//! ## Example
//!
//! ```
//! use airtable_schema::{ColumnDescriptor, FieldKind, TableSchema, to_service_format};
//! use serde_json::json;
//!
//! static ORDERS: TableSchema = TableSchema::new(
//!     "Orders",
//!     &[
//!         ColumnDescriptor::new("orderName", "Order Name", "text", FieldKind::Scalar),
//!         ColumnDescriptor::new("customerId", "Customer", "foreignKey-one", FieldKind::LinkOne),
//!     ],
//! );
//!
//! let record = json!({ "orderName": "A1", "customerId": "rec123" });
//! let native = to_service_format(&ORDERS, record.as_object().unwrap().clone()).unwrap();
//!
//! assert_eq!(native["Order Name"], json!("A1"));
//! assert_eq!(native["Customer"], json!(["rec123"]));
//! ```

pub mod batch;
pub mod bindings;
pub mod convert;
pub mod error;
pub mod formula;
pub mod record;
pub mod schema;
pub mod service;

// Re-exports for convenience
pub use batch::{MAX_RECORDS_PER_REQUEST, chunk, in_batches};
pub use convert::{
    from_service_format, from_service_record, from_service_records, sort_to_service,
    to_service_format,
};
pub use error::{AirtableError, MismatchReason, RecordOperation};
pub use record::{Record, RecordId, StoredRecord};
pub use schema::{ColumnDescriptor, FieldKind, TableSchema};
pub use service::{RecordService, SelectQuery, ServiceError, Sort, SortDirection};
