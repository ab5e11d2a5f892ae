//! `schema.rs` generation.
//!
//! Emits, in this order:
//! - `Tables`, one variant per table with its native name and embedded schema
//! - one `pub static airtable_schema::TableSchema` per table
//! - `columns::<table>::<COLUMN>` descriptor constants

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::SCHEMA_FILE;
use super::artifact::Artifact;
use super::module_docs::{ArtifactKind, ModuleDocBuilder};
use super::plan::{ColumnPlan, KindPlan, SchemaPlan, TablePlan};
use crate::errors::GeneratorError;

/// Generates the constants artifact.
///
/// ## Errors
///
/// Returns [`GeneratorError::IdentifierCollision`] if two items share a name.
pub fn generate_constants(plan: &SchemaPlan<'_>) -> Result<Artifact, GeneratorError> {
    let docs = ModuleDocBuilder::new(plan, ArtifactKind::Constants).build();
    let mut artifact = Artifact::new(SCHEMA_FILE, docs);

    artifact.declare("Tables", SCHEMA_FILE, generate_tables_enum(plan))?;
    for table in &plan.tables {
        artifact.declare(&table.static_ident, table.name(), generate_table_static(table))?;
    }
    artifact.declare("columns", SCHEMA_FILE, generate_columns_module(plan))?;

    Ok(artifact)
}

/// Generates the `Tables` enum and its accessors.
pub fn generate_tables_enum(plan: &SchemaPlan<'_>) -> TokenStream {
    let variants: Vec<_> = plan
        .tables
        .iter()
        .map(|t| format_ident!("{}", t.variant))
        .collect();
    let variant_docs = plan.tables.iter().map(|t| format!(" `{}`", t.name()));
    let names = plan.tables.iter().map(|t| t.name());
    let statics = plan
        .tables
        .iter()
        .map(|t| format_ident!("{}", t.static_ident));

    quote! {
        /// Tables of the base, in schema order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Tables {
            #(
                #[doc = #variant_docs]
                #variants,
            )*
        }

        impl Tables {
            /// Every table, in schema order.
            pub const ALL: &'static [Tables] = &[#(Tables::#variants),*];

            /// Native Airtable table name.
            pub fn name(self) -> &'static str {
                match self {
                    #(Tables::#variants => #names,)*
                }
            }

            /// Embedded schema of the table.
            pub fn schema(self) -> &'static airtable_schema::TableSchema {
                match self {
                    #(Tables::#variants => &#statics,)*
                }
            }
        }
    }
}

/// Generates the `pub static` schema of one table.
pub fn generate_table_static(table: &TablePlan<'_>) -> TokenStream {
    let ident = format_ident!("{}", table.static_ident);
    let module = format_ident!("{}", table.module);
    let name = table.name();
    let doc = format!(" Embedded schema of `{name}`.");
    let columns = table
        .columns
        .iter()
        .map(|c| format_ident!("{}", c.const_ident));

    quote! {
        #[doc = #doc]
        pub static #ident: airtable_schema::TableSchema = airtable_schema::TableSchema::new(
            #name,
            &[#(columns::#module::#columns),*],
        );
    }
}

/// Generates the `columns` module with one submodule per table.
pub fn generate_columns_module(plan: &SchemaPlan<'_>) -> TokenStream {
    let modules = plan.tables.iter().map(|table| {
        let module = format_ident!("{}", table.module);
        let doc = format!(" Columns of `{}`.", table.name());
        let constants = table.columns.iter().map(generate_column_constant);
        quote! {
            #[doc = #doc]
            pub mod #module {
                #(#constants)*
            }
        }
    });

    quote! {
        /// Column descriptors per table.
        pub mod columns {
            #(#modules)*
        }
    }
}

/// Generates one column descriptor constant.
pub fn generate_column_constant(column: &ColumnPlan<'_>) -> TokenStream {
    let ident = format_ident!("{}", column.const_ident);
    let key = &column.key;
    let name = &column.column.name;
    let native_type = column.column.column_type.as_str();
    let kind = match column.kind {
        KindPlan::Scalar => quote! { airtable_schema::FieldKind::Scalar },
        KindPlan::LinkOne => quote! { airtable_schema::FieldKind::LinkOne },
        KindPlan::LinkMany => quote! { airtable_schema::FieldKind::LinkMany },
    };
    let doc = match &column.column.linked_table {
        Some(linked) => format!(" `{name}` ({native_type}), links to `{linked}`."),
        None => format!(" `{name}` ({native_type})."),
    };

    quote! {
        #[doc = #doc]
        pub const #ident: airtable_schema::ColumnDescriptor =
            airtable_schema::ColumnDescriptor::new(#key, #name, #native_type, #kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{orders_metadata, orders_schema};
    use airtable_schema_define::{NamingExceptions, Schema};
    use std::collections::BTreeMap;

    fn render(schema: &Schema) -> String {
        let plan =
            SchemaPlan::build(schema, &orders_metadata(), &NamingExceptions::default()).unwrap();
        generate_constants(&plan).unwrap().render().unwrap()
    }

    #[test]
    fn tables_enum_lists_every_table() {
        let code = render(&orders_schema());

        assert!(code.contains("pub enum Tables"));
        assert!(code.contains("Orders,"));
        assert!(code.contains("LineItems,"));
        assert!(code.contains("Tables::LineItems => \"Line Items\""));
        assert!(code.contains("Tables::Orders => &ORDERS"));
    }

    #[test]
    fn column_constants_carry_both_names_and_kind() {
        let code = render(&orders_schema());

        assert!(code.contains("pub mod orders"));
        assert!(code.contains("pub const CUSTOMER_ID: airtable_schema::ColumnDescriptor"));
        assert!(code.contains("\"customerId\""));
        assert!(code.contains("\"foreignKey-one\""));
        assert!(code.contains("airtable_schema::FieldKind::LinkOne"));
        assert!(code.contains("airtable_schema::FieldKind::LinkMany"));
        assert!(code.contains("links to `Customers`"));
    }

    #[test]
    fn table_static_references_column_constants() {
        let code = render(&orders_schema());

        assert!(code.contains("pub static ORDERS: airtable_schema::TableSchema"));
        assert!(code.contains("columns::orders::ORDER_NAME"));
        assert!(code.contains("columns::line_items::ORDER_ID"));
    }

    #[test]
    fn empty_schema_has_empty_enum() {
        let schema = Schema::default();
        let plan =
            SchemaPlan::build(&schema, &BTreeMap::new(), &NamingExceptions::default()).unwrap();
        let code = generate_constants(&plan).unwrap().render().unwrap();

        assert!(code.contains("pub enum Tables {}"));
        assert!(code.contains("pub mod columns {}"));
    }
}
