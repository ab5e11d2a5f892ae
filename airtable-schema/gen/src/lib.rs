//! Airtable schema code generator library.
//!
//! This crate turns a raw Airtable schema dump into a typed Rust module tree
//! built on the `airtable-schema` runtime. The generated code includes:
//!
//! - A `Tables` enum, one embedded `TableSchema` static per table and a
//!   descriptor constant per column
//! - Native-format bindings per table, keyed by Airtable column names
//! - CRUD functions in canonical field names (`create_order`,
//!   `get_orders_by_ids`, `get_orders_by_order_name`, ...)
//! - A `schema.json` snapshot that carries curated lookup fields into the
//!   next run
//!
//! ## Modules
//!
//! - [`normalize`] - Raw schema payload to canonical [`airtable_schema_define::Schema`]
//! - [`merge`] - Carrying lookup fields across regenerations
//! - [`naming`] / [`case`] - Canonical identifiers and Rust item names
//! - [`codegen`] - Planning and emitting each generated file
//! - [`output`] - Validation, formatting and atomic writes
//! - [`pipeline`] - One full generation run
//! - [`config`] - TOML configuration
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use airtable_schema_gen::config::GeneratorConfig;
//! use airtable_schema_gen::pipeline::run;
//!
//! let config = GeneratorConfig::discover(None).unwrap();
//! let report = run(&config, false).unwrap();
//! println!("generated {} tables", report.tables);
//! ```

pub mod case;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod merge;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod pipeline;

#[cfg(test)]
mod test_utils;
