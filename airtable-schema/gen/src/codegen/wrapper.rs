//! `request.rs` generation.
//!
//! Canonical CRUD functions, grouped by operation: every table's create
//! functions come first, then reads, updates and deletes. Each function
//! converts records against the table's embedded schema and calls the
//! matching binding in `airtable.rs`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use super::REQUEST_FILE;
use super::artifact::Artifact;
use super::module_docs::{ArtifactKind, ModuleDocBuilder};
use super::plan::{LookupPlan, SchemaPlan, TablePlan};
use crate::errors::GeneratorError;

/// Operation category of a wrapper function. Iteration order is the order
/// the categories appear in `request.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CrudOperation {
    /// `create_<singular>`, `create_many_<plural>`.
    Create,
    /// `get_<singular>_by_id`, `get_<plural>_by_ids`, `get_all_<plural>`
    /// and one `get_<plural>_by_<field>` per lookup field.
    Read,
    /// `update_<singular>`, `update_many_<plural>`.
    Update,
    /// `delete_<singular>`.
    Delete,
}

impl CrudOperation {
    /// Named functions of this category for one table.
    pub fn functions(self, table: &TablePlan<'_>) -> Vec<(String, TokenStream)> {
        let names = Names::new(table);
        match self {
            Self::Create => vec![create_one(&names), create_many(&names)],
            Self::Read => {
                let mut functions = vec![get_by_id(&names), get_by_ids(&names), get_all(&names)];
                functions.extend(table.lookups.iter().map(|l| get_by_lookup(&names, l)));
                functions
            }
            Self::Update => vec![update_one(&names), update_many(&names)],
            Self::Delete => vec![delete_one(&names)],
        }
    }
}

/// Generates the wrapper artifact.
///
/// ## Errors
///
/// Returns [`GeneratorError::IdentifierCollision`] if two tables produce the
/// same function name, e.g. `Order` and `Orders` both yield `create_order`.
pub fn generate_wrapper(plan: &SchemaPlan<'_>) -> Result<Artifact, GeneratorError> {
    let docs = ModuleDocBuilder::new(plan, ArtifactKind::Wrapper).build();
    let mut artifact = Artifact::new(REQUEST_FILE, docs);

    if !plan.tables.is_empty() {
        artifact.import(quote! {
            use airtable_schema::{AirtableError, Record, RecordId, RecordService, Sort, StoredRecord};
        });
        artifact.import(quote! {
            use super::{airtable, schema};
        });
    }

    for operation in CrudOperation::iter() {
        let mut count = 0;
        for table in &plan.tables {
            for (name, tokens) in operation.functions(table) {
                artifact.declare(name, table.name(), tokens)?;
                count += 1;
            }
        }
        debug!(%operation, functions = count, "Generated wrapper functions");
    }

    Ok(artifact)
}

/// Identifiers shared by every function of one table.
struct Names<'p> {
    table: &'p TablePlan<'p>,
    singular: &'p str,
    plural: &'p str,
    table_static: proc_macro2::Ident,
    module: proc_macro2::Ident,
}

impl<'p> Names<'p> {
    fn new(table: &'p TablePlan<'p>) -> Self {
        Self {
            table,
            singular: &table.singular,
            plural: &table.plural,
            table_static: format_ident!("{}", table.static_ident),
            module: format_ident!("{}", table.module),
        }
    }

    fn doc(&self, text: &str) -> String {
        format!(" {text} `{}`.", self.table.name())
    }
}

fn create_one(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("create_{}", n.singular);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Creates one record in");

    let tokens = quote! {
        #[doc = #doc]
        ///
        /// Returns the id of the new record.
        pub async fn #ident<S: RecordService>(
            service: &S,
            record: Record,
        ) -> Result<RecordId, AirtableError> {
            let fields = airtable_schema::to_service_format(&schema::#table, record)?;
            Ok(airtable::#module::create(service, fields).await?.id)
        }
    };
    (name, tokens)
}

fn create_many(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("create_many_{}", n.plural);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Creates records in");

    let tokens = quote! {
        #[doc = #doc]
        ///
        /// Records are sent in batches of 10, all issued together. Ids come
        /// back in input order.
        pub async fn #ident<S: RecordService>(
            service: &S,
            records: Vec<Record>,
        ) -> Result<Vec<RecordId>, AirtableError> {
            let records = records
                .into_iter()
                .map(|record| airtable_schema::to_service_format(&schema::#table, record))
                .collect::<Result<Vec<_>, _>>()?;
            let created = airtable_schema::in_batches(records, |batch| {
                airtable::#module::create_batch(service, batch)
            })
            .await?;
            Ok(created.into_iter().map(|record| record.id).collect())
        }
    };
    (name, tokens)
}

fn get_by_id(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("get_{}_by_id", n.singular);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Fetches one record of");

    let tokens = quote! {
        #[doc = #doc]
        pub async fn #ident<S: RecordService>(
            service: &S,
            id: &str,
        ) -> Result<StoredRecord, AirtableError> {
            let record = airtable::#module::find(service, id).await?;
            airtable_schema::from_service_record(&schema::#table, record)
        }
    };
    (name, tokens)
}

fn get_by_ids(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("get_{}_by_ids", n.plural);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Fetches records of");

    let tokens = quote! {
        #[doc = #doc]
        ///
        /// Records are matched by id in a single query. `filter_by_formula`,
        /// if given, must also hold. Ids that match nothing are skipped.
        pub async fn #ident<S: RecordService>(
            service: &S,
            ids: &[RecordId],
            filter_by_formula: Option<&str>,
            sort: &[Sort],
        ) -> Result<Vec<StoredRecord>, AirtableError> {
            let formula = airtable_schema::formula::and(
                filter_by_formula,
                airtable_schema::formula::records_by_ids(ids),
            );
            let sort = airtable_schema::sort_to_service(&schema::#table, sort)?;
            let records = airtable::#module::select(service, Some(formula), sort).await?;
            airtable_schema::from_service_records(&schema::#table, records)
        }
    };
    (name, tokens)
}

fn get_all(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("get_all_{}", n.plural);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Fetches every record of");

    let tokens = quote! {
        #[doc = #doc]
        pub async fn #ident<S: RecordService>(
            service: &S,
            filter_by_formula: Option<&str>,
            sort: &[Sort],
        ) -> Result<Vec<StoredRecord>, AirtableError> {
            let sort = airtable_schema::sort_to_service(&schema::#table, sort)?;
            let records = airtable::#module::select(
                service,
                filter_by_formula.map(str::to_string),
                sort,
            )
            .await?;
            airtable_schema::from_service_records(&schema::#table, records)
        }
    };
    (name, tokens)
}

fn get_by_lookup(n: &Names<'_>, lookup: &LookupPlan) -> (String, TokenStream) {
    let name = format!("get_{}_by_{}", n.plural, lookup.suffix);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let column = format_ident!("{}", lookup.const_ident);
    let doc = format!(
        " Fetches records of `{}` whose `{}` equals `value`.",
        n.table.name(),
        lookup.field
    );

    let tokens = quote! {
        #[doc = #doc]
        ///
        /// No match yields an empty list.
        pub async fn #ident<S: RecordService>(
            service: &S,
            value: &str,
            filter_by_formula: Option<&str>,
            sort: &[Sort],
        ) -> Result<Vec<StoredRecord>, AirtableError> {
            let sort = airtable_schema::sort_to_service(&schema::#table, sort)?;
            let records = airtable::#module::select_by_attribute(
                service,
                schema::columns::#module::#column.name,
                value,
                filter_by_formula,
                sort,
            )
            .await?;
            airtable_schema::from_service_records(&schema::#table, records)
        }
    };
    (name, tokens)
}

fn update_one(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("update_{}", n.singular);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Updates one record of");

    let tokens = quote! {
        #[doc = #doc]
        ///
        /// Only the fields present in `record` change.
        pub async fn #ident<S: RecordService>(
            service: &S,
            id: &str,
            record: Record,
        ) -> Result<RecordId, AirtableError> {
            let fields = airtable_schema::to_service_format(&schema::#table, record)?;
            Ok(airtable::#module::update(service, id, fields).await?.id)
        }
    };
    (name, tokens)
}

fn update_many(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("update_many_{}", n.plural);
    let ident = format_ident!("{}", name);
    let (table, module) = (&n.table_static, &n.module);
    let doc = n.doc("Updates records of");

    let tokens = quote! {
        #[doc = #doc]
        ///
        /// Updates are sent in batches of 10, all issued together.
        pub async fn #ident<S: RecordService>(
            service: &S,
            updates: Vec<(RecordId, Record)>,
        ) -> Result<Vec<RecordId>, AirtableError> {
            let updates = updates
                .into_iter()
                .map(|(id, record)| {
                    airtable_schema::to_service_format(&schema::#table, record)
                        .map(|fields| (id, fields))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let updated = airtable_schema::in_batches(updates, |batch| {
                airtable::#module::update_batch(service, batch)
            })
            .await?;
            Ok(updated.into_iter().map(|record| record.id).collect())
        }
    };
    (name, tokens)
}

fn delete_one(n: &Names<'_>) -> (String, TokenStream) {
    let name = format!("delete_{}", n.singular);
    let ident = format_ident!("{}", name);
    let module = &n.module;
    let doc = n.doc("Deletes one record of");

    let tokens = quote! {
        #[doc = #doc]
        pub async fn #ident<S: RecordService>(
            service: &S,
            id: &str,
        ) -> Result<RecordId, AirtableError> {
            airtable::#module::destroy(service, id).await
        }
    };
    (name, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{orders_metadata, orders_schema};
    use airtable_schema_define::{NamingExceptions, Schema, Table};
    use std::collections::BTreeMap;

    fn render(schema: &Schema) -> String {
        let plan =
            SchemaPlan::build(schema, &orders_metadata(), &NamingExceptions::default()).unwrap();
        generate_wrapper(&plan).unwrap().render().unwrap()
    }

    #[test]
    fn orders_scenario_functions() {
        let code = render(&orders_schema());

        for function in [
            "create_order",
            "create_many_orders",
            "get_order_by_id",
            "get_orders_by_ids",
            "get_all_orders",
            "get_orders_by_order_name",
            "update_order",
            "update_many_orders",
            "delete_order",
            "create_line_item",
            "get_all_line_items",
            "delete_customer",
            "get_customers_by_ids",
        ] {
            assert!(
                code.contains(&format!("pub async fn {function}<")),
                "missing {function}"
            );
        }
        // only Orders has lookup fields configured
        assert!(!code.contains("get_customers_by_full_name"));
        assert!(!code.contains("get_line_items_by_sku"));
    }

    #[test]
    fn categories_are_grouped_in_crud_order() {
        let code = render(&orders_schema());
        let last = |prefix: &str| code.rfind(&format!("pub async fn {prefix}")).unwrap();
        let first = |prefix: &str| code.find(&format!("pub async fn {prefix}")).unwrap();

        assert!(last("create_") < first("get_"));
        assert!(last("get_") < first("update_"));
        assert!(last("update_") < first("delete_"));
    }

    #[test]
    fn lookup_uses_native_column_constant() {
        let code = render(&orders_schema());
        assert!(code.contains("schema::columns::orders::ORDER_NAME.name"));
    }

    #[test]
    fn plural_collision_is_reported() {
        let schema =
            Schema::from_tables([Table::new("Order", vec![]), Table::new("Orders", vec![])])
                .unwrap();
        let plan =
            SchemaPlan::build(&schema, &BTreeMap::new(), &NamingExceptions::default()).unwrap();
        let err = generate_wrapper(&plan).unwrap_err();

        match err {
            GeneratorError::IdentifierCollision {
                identifier,
                first,
                second,
                ..
            } => {
                assert_eq!(identifier, "create_order");
                assert_eq!(first, "Order");
                assert_eq!(second, "Orders");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn empty_plan_has_no_imports() {
        let code = render(&Schema::default());
        assert!(!code.contains("use airtable_schema"));
        assert!(code.contains("No tables defined."));
    }

    #[test]
    fn operations_iterate_in_crud_order() {
        let order: Vec<_> = CrudOperation::iter().map(|op| op.to_string()).collect();
        assert_eq!(order, ["create", "read", "update", "delete"]);
    }
}
