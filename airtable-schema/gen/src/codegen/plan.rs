//! Identifier planning.
//!
//! Every name the generated code uses is derived and checked here, before
//! any tokens are produced: canonical identifiers, Rust item names and the
//! singular/plural stems of wrapper functions. A name that comes out empty,
//! or that two native names share, stops generation with an error naming
//! the offending sources.

use std::collections::{BTreeMap, HashMap};

use airtable_schema_define::{Cardinality, Column, NamingExceptions, Schema, Table, TableMetadata};

use crate::case::{camel_ident, screaming_ident, snake_ident, to_snake_case};
use crate::errors::GeneratorError;
use crate::naming::{column_identifier, depluralize, pluralize, table_identifier};

/// How a column's value is shaped at runtime. Mirrors
/// `airtable_schema::FieldKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindPlan {
    /// Non-relationship column.
    Scalar,
    /// Link to a single record.
    LinkOne,
    /// Link to many records.
    LinkMany,
}

impl KindPlan {
    fn of(column: &Column) -> Self {
        match column.column_type.cardinality() {
            None => Self::Scalar,
            Some(Cardinality::One) => Self::LinkOne,
            Some(Cardinality::Many) => Self::LinkMany,
        }
    }
}

/// Planned names for one column.
#[derive(Debug, Clone)]
pub struct ColumnPlan<'a> {
    /// The column.
    pub column: &'a Column,
    /// Canonical field key (`customerId`).
    pub key: String,
    /// Column constant name (`CUSTOMER_ID`).
    pub const_ident: String,
    /// Runtime value shape.
    pub kind: KindPlan,
}

/// A "find by attribute" accessor.
#[derive(Debug, Clone)]
pub struct LookupPlan {
    /// Native column name.
    pub field: String,
    /// Constant of the column in `columns::<table>`.
    pub const_ident: String,
    /// Snake-case suffix after `_by_` (`order_name`).
    pub suffix: String,
}

/// Planned names for one table.
#[derive(Debug, Clone)]
pub struct TablePlan<'a> {
    /// The table.
    pub table: &'a Table,
    /// Canonical table identifier (`LineItems`).
    pub identifier: String,
    /// `Tables` variant (`LineItems`).
    pub variant: String,
    /// Table static (`LINE_ITEMS`).
    pub static_ident: String,
    /// Per-table module in `airtable.rs` and `schema::columns` (`line_items`).
    pub module: String,
    /// Singular function stem (`line_item`).
    pub singular: String,
    /// Plural function stem (`line_items`).
    pub plural: String,
    /// Columns in schema order.
    pub columns: Vec<ColumnPlan<'a>>,
    /// Lookup accessors in metadata order.
    pub lookups: Vec<LookupPlan>,
}

impl TablePlan<'_> {
    /// Native table name.
    pub fn name(&self) -> &str {
        &self.table.name
    }
}

/// Planned names for a whole schema.
#[derive(Debug, Clone)]
pub struct SchemaPlan<'a> {
    /// Tables in schema order.
    pub tables: Vec<TablePlan<'a>>,
}

impl<'a> SchemaPlan<'a> {
    /// Plans every identifier of `schema`.
    ///
    /// ## Errors
    ///
    /// - [`GeneratorError::EmptyIdentifier`] if a table or column name yields
    ///   no usable identifier
    /// - [`GeneratorError::IdentifierCollision`] if two tables, or two columns
    ///   of one table, derive the same identifier or item name
    /// - [`GeneratorError::UnknownLookupField`] if a lookup field names no
    ///   column of its table
    pub fn build(
        schema: &'a Schema,
        metadata: &BTreeMap<String, TableMetadata>,
        exceptions: &NamingExceptions,
    ) -> Result<Self, GeneratorError> {
        let namespace = "tables";
        let mut identifiers = Seen::new(namespace);
        let mut modules = Seen::new(namespace);
        let mut statics = Seen::new(namespace);
        let mut variants = Seen::new(namespace);

        let mut tables = Vec::with_capacity(schema.len());
        for table in schema.tables() {
            let identifier = non_empty(table_identifier(&table.name), namespace, &table.name)?;
            let module = non_empty(snake_ident(&identifier), namespace, &table.name)?;
            let static_ident = screaming_ident(&identifier);
            let variant = camel_ident(&identifier);

            identifiers.insert(&identifier, &table.name)?;
            modules.insert(&module, &table.name)?;
            statics.insert(&static_ident, &table.name)?;
            variants.insert(&variant, &table.name)?;

            let columns = plan_columns(table, exceptions)?;
            let lookups = match metadata.get(&table.name) {
                Some(meta) => plan_lookups(table, &columns, &meta.lookup_fields)?,
                None => Vec::new(),
            };

            tables.push(TablePlan {
                table,
                singular: to_snake_case(&depluralize(&identifier, exceptions)),
                plural: to_snake_case(&pluralize(&identifier, exceptions)),
                identifier,
                variant,
                static_ident,
                module,
                columns,
                lookups,
            });
        }

        Ok(Self { tables })
    }
}

fn plan_columns<'a>(
    table: &'a Table,
    exceptions: &NamingExceptions,
) -> Result<Vec<ColumnPlan<'a>>, GeneratorError> {
    let namespace = format!("columns of table '{}'", table.name);
    let mut keys = Seen::new(&namespace);
    let mut consts = Seen::new(&namespace);

    table
        .columns
        .iter()
        .map(|column| {
            let key = non_empty(column_identifier(column, exceptions), &namespace, &column.name)?;
            let const_ident = non_empty(screaming_ident(&key), &namespace, &column.name)?;
            keys.insert(&key, &column.name)?;
            consts.insert(&const_ident, &column.name)?;
            Ok(ColumnPlan {
                column,
                key,
                const_ident,
                kind: KindPlan::of(column),
            })
        })
        .collect()
}

fn plan_lookups(
    table: &Table,
    columns: &[ColumnPlan<'_>],
    fields: &[String],
) -> Result<Vec<LookupPlan>, GeneratorError> {
    let mut lookups: Vec<LookupPlan> = Vec::with_capacity(fields.len());
    for field in fields {
        if lookups.iter().any(|l| &l.field == field) {
            continue;
        }
        let column = columns
            .iter()
            .find(|c| &c.column.name == field)
            .ok_or_else(|| GeneratorError::UnknownLookupField {
                table: table.name.clone(),
                field: field.clone(),
            })?;
        lookups.push(LookupPlan {
            field: field.clone(),
            const_ident: column.const_ident.clone(),
            suffix: to_snake_case(&column.key),
        });
    }
    Ok(lookups)
}

fn non_empty(identifier: String, namespace: &str, name: &str) -> Result<String, GeneratorError> {
    if identifier.is_empty() {
        Err(GeneratorError::EmptyIdentifier {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    } else {
        Ok(identifier)
    }
}

/// Identifier to first native name, within one namespace.
struct Seen<'n> {
    namespace: &'n str,
    names: HashMap<String, String>,
}

impl<'n> Seen<'n> {
    fn new(namespace: &'n str) -> Self {
        Self {
            namespace,
            names: HashMap::new(),
        }
    }

    fn insert(&mut self, identifier: &str, source: &str) -> Result<(), GeneratorError> {
        match self.names.get(identifier) {
            Some(first) => Err(GeneratorError::IdentifierCollision {
                namespace: self.namespace.to_string(),
                identifier: identifier.to_string(),
                first: first.clone(),
                second: source.to_string(),
            }),
            None => {
                self.names.insert(identifier.to_string(), source.to_string());
                Ok(())
            }
        }
    }
}
