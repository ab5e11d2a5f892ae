//! Module documentation for generated files.
//!
//! This module provides the [`ModuleDocBuilder`] struct, which writes the
//! `//!` header of each generated file: an introduction for the kind of
//! file, the list of tables it covers, and for the wrapper a usage example.

use proc_macro2::TokenStream;
use quote::quote;
use strum::Display;

use super::plan::{SchemaPlan, TablePlan};

/// Which generated file the documentation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArtifactKind {
    /// `mod.rs`.
    #[strum(serialize = "mod.rs")]
    Root,
    /// `schema.rs`.
    #[strum(serialize = "schema.rs")]
    Constants,
    /// `airtable.rs`.
    #[strum(serialize = "airtable.rs")]
    Bindings,
    /// `request.rs`.
    #[strum(serialize = "request.rs")]
    Wrapper,
}

/// Builds module-level documentation for a generated file.
///
/// ## Examples
///
/// ```ignore
/// let plan = SchemaPlan::build(&schema, &metadata, &exceptions)?;
/// let docs = ModuleDocBuilder::new(&plan, ArtifactKind::Wrapper).build();
/// ```
pub struct ModuleDocBuilder<'a> {
    plan: &'a SchemaPlan<'a>,
    kind: ArtifactKind,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a documentation builder for one generated file.
    pub fn new(plan: &'a SchemaPlan<'a>, kind: ArtifactKind) -> Self {
        Self { plan, kind }
    }

    /// Builds the `#![doc = "..."]` attributes.
    pub fn build(&self) -> TokenStream {
        let intro = self.intro_paragraph();
        let tables = self.tables_section();

        match self.example_section() {
            Some(example) => quote! {
                #![doc = #intro]
                //!
                #![doc = #tables]
                //!
                #![doc = #example]
            },
            None => quote! {
                #![doc = #intro]
                //!
                #![doc = #tables]
            },
        }
    }

    fn intro_paragraph(&self) -> String {
        let body = match self.kind {
            ArtifactKind::Root => {
                "Generated Airtable modules.\n\n \
                 - `schema` - table and column constants, and the embedded schema\n \
                 - `airtable` - native-format bindings per table\n \
                 - `request` - CRUD functions in canonical field names"
            }
            ArtifactKind::Constants => {
                "Table and column constants.\n\n \
                 The table statics embed the schema as it was at generation time. \
                 Record conversion checks every field against them."
            }
            ArtifactKind::Bindings => {
                "Native-format Airtable bindings.\n\n \
                 Records here are keyed by Airtable column names. Writes check that \
                 Airtable affected exactly the records sent."
            }
            ArtifactKind::Wrapper => {
                "CRUD functions in canonical field names.\n\n \
                 Records are converted to and from Airtable's format against the \
                 embedded schema. Batched writes send at most 10 records per request."
            }
        };
        format!(" {body}")
    }

    fn tables_section(&self) -> String {
        if self.plan.tables.is_empty() {
            return " ## Tables\n\n No tables defined.".to_string();
        }

        let mut lines = vec![" ## Tables".to_string(), String::new()];
        for table in &self.plan.tables {
            lines.push(format!(" - {}", self.table_line(table)));
        }
        lines.join("\n")
    }

    fn table_line(&self, table: &TablePlan<'_>) -> String {
        match self.kind {
            ArtifactKind::Constants => format!(
                "`{}` - `{}` ({} columns)",
                table.static_ident,
                table.name(),
                table.columns.len()
            ),
            ArtifactKind::Bindings => format!("`{}` - `{}`", table.module, table.name()),
            ArtifactKind::Root | ArtifactKind::Wrapper => {
                let lookups = table
                    .lookups
                    .iter()
                    .map(|l| format!("`{}`", l.field))
                    .collect::<Vec<_>>();
                if lookups.is_empty() {
                    format!("`{}`", table.name())
                } else {
                    format!("`{}`, looked up by {}", table.name(), lookups.join(", "))
                }
            }
        }
    }

    /// Example for the wrapper, using the first table.
    fn example_section(&self) -> Option<String> {
        if self.kind != ArtifactKind::Wrapper {
            return None;
        }
        let table = self.plan.tables.first()?;
        let field = table
            .columns
            .iter()
            .find(|c| c.kind == super::plan::KindPlan::Scalar)
            .map(|c| c.key.as_str())
            .unwrap_or("name");

        Some(format!(
            " ## Example\n\n \
             ```ignore\n \
             let mut record = airtable_schema::Record::new();\n \
             record.insert(\"{field}\".to_string(), \"value\".into());\n \
             let id = create_{singular}(&service, record).await?;\n \
             let stored = get_{singular}_by_id(&service, &id).await?;\n \
             ```",
            singular = table.singular,
        ))
    }
}
