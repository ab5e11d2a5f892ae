//! `airtable.rs` generation.
//!
//! One module per table with native-format functions. Each delegates to
//! `airtable_schema::bindings`, passing the table's native name from the
//! embedded schema and, for reads, the configured view.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::artifact::Artifact;
use super::module_docs::{ArtifactKind, ModuleDocBuilder};
use super::plan::{SchemaPlan, TablePlan};
use super::{BINDINGS_FILE, EmitOptions};
use crate::errors::GeneratorError;

/// Generates the bindings artifact.
///
/// ## Errors
///
/// Returns [`GeneratorError::IdentifierCollision`] if two items share a name.
pub fn generate_bindings(
    plan: &SchemaPlan<'_>,
    options: &EmitOptions,
) -> Result<Artifact, GeneratorError> {
    let docs = ModuleDocBuilder::new(plan, ArtifactKind::Bindings).build();
    let mut artifact = Artifact::new(BINDINGS_FILE, docs);

    let view = &options.default_view;
    artifact.declare(
        "DEFAULT_VIEW",
        BINDINGS_FILE,
        quote! {
            /// View every select query reads through.
            pub const DEFAULT_VIEW: &str = #view;
        },
    )?;

    if let Some(base_id) = &options.base_id {
        artifact.declare(
            "BASE_ID",
            BINDINGS_FILE,
            quote! {
                /// Airtable base these bindings were generated from.
                pub const BASE_ID: &str = #base_id;
            },
        )?;
    }

    for table in &plan.tables {
        artifact.declare(&table.module, table.name(), generate_table_bindings(table))?;
    }

    Ok(artifact)
}

/// Generates the bindings module of one table.
pub fn generate_table_bindings(table: &TablePlan<'_>) -> TokenStream {
    let module = format_ident!("{}", table.module);
    let table_static = format_ident!("{}", table.static_ident);
    let doc = format!(" Native-format bindings for `{}`.", table.name());

    quote! {
        #[doc = #doc]
        pub mod #module {
            use airtable_schema::{
                AirtableError, Record, RecordId, RecordService, SelectQuery, Sort, StoredRecord,
            };

            use super::super::schema::#table_static as TABLE;
            use super::DEFAULT_VIEW;

            /// Creates one record.
            pub async fn create<S: RecordService>(
                service: &S,
                fields: Record,
            ) -> Result<StoredRecord, AirtableError> {
                airtable_schema::bindings::create_record(service, TABLE.name(), fields).await
            }

            /// Creates up to 10 records in one request.
            pub async fn create_batch<S: RecordService>(
                service: &S,
                records: Vec<Record>,
            ) -> Result<Vec<StoredRecord>, AirtableError> {
                airtable_schema::bindings::create_records(service, TABLE.name(), records).await
            }

            /// Fetches one record by id.
            pub async fn find<S: RecordService>(
                service: &S,
                id: &str,
            ) -> Result<StoredRecord, AirtableError> {
                airtable_schema::bindings::find_record(service, TABLE.name(), id).await
            }

            /// Selects every record matching the formula, through the default view.
            pub async fn select<S: RecordService>(
                service: &S,
                filter_by_formula: Option<String>,
                sort: Vec<Sort>,
            ) -> Result<Vec<StoredRecord>, AirtableError> {
                let query = SelectQuery {
                    view: Some(DEFAULT_VIEW.to_string()),
                    filter_by_formula,
                    sort,
                };
                airtable_schema::bindings::select_records(service, TABLE.name(), &query).await
            }

            /// Selects records whose `column` equals `value`.
            pub async fn select_by_attribute<S: RecordService>(
                service: &S,
                column: &str,
                value: &str,
                filter_by_formula: Option<&str>,
                sort: Vec<Sort>,
            ) -> Result<Vec<StoredRecord>, AirtableError> {
                airtable_schema::bindings::select_by_attribute(
                    service,
                    TABLE.name(),
                    DEFAULT_VIEW,
                    column,
                    value,
                    filter_by_formula,
                    sort,
                )
                .await
            }

            /// Applies a partial update to one record.
            pub async fn update<S: RecordService>(
                service: &S,
                id: &str,
                fields: Record,
            ) -> Result<StoredRecord, AirtableError> {
                airtable_schema::bindings::update_record(service, TABLE.name(), id, fields).await
            }

            /// Applies partial updates to up to 10 records in one request.
            pub async fn update_batch<S: RecordService>(
                service: &S,
                updates: Vec<(RecordId, Record)>,
            ) -> Result<Vec<StoredRecord>, AirtableError> {
                airtable_schema::bindings::update_records(service, TABLE.name(), updates).await
            }

            /// Deletes one record.
            pub async fn destroy<S: RecordService>(
                service: &S,
                id: &str,
            ) -> Result<RecordId, AirtableError> {
                airtable_schema::bindings::delete_record(service, TABLE.name(), id).await
            }
        }
    }
}
