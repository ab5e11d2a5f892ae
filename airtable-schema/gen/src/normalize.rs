//! Raw Airtable schema payload to canonical [`Schema`].
//!
//! The raw payload is what the schema-dump console script copies out of the
//! Airtable API docs page: an object keyed by internal table id, each entry
//! carrying the table name and its column descriptors.
//!
//! ```text
//! {
//!   "tblA": {
//!     "name": "Orders",
//!     "columns": [
//!       { "name": "Order Name", "type": "text" },
//!       { "name": "Customer", "type": "foreignKey",
//!         "typeOptions": { "relationship": "one" }, "foreignTable": "tblB" }
//!     ]
//!   },
//!   ...
//! }
//! ```
//!
//! Table order follows the payload; serde_json is built with
//! `preserve_order` so that order survives parsing.

use std::collections::HashMap;
use std::str::FromStr;

use airtable_schema_define::{Cardinality, Column, ColumnType, Schema, Table};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use crate::errors::GeneratorError;

/// Parses and normalizes a raw schema document.
///
/// ## Errors
///
/// Returns [`GeneratorError::MalformedSchema`] if `raw` is not valid JSON or
/// fails [`normalize`].
pub fn normalize_str(raw: &str) -> Result<Schema, GeneratorError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| GeneratorError::malformed("", format!("invalid JSON: {e}")))?;
    normalize(&value)
}

/// Normalizes a raw schema payload.
///
/// Foreign-key columns get their cardinality folded into the type
/// (`foreignKey-one`, `foreignKey-many`) and, when the payload names a
/// related table that is also present, its native name as `linked_table`.
///
/// ## Errors
///
/// Returns [`GeneratorError::MalformedSchema`], with the location of the
/// problem, when:
/// - the root or a table entry is not an object
/// - a table or column has no string `name`
/// - a table has no `columns` array
/// - a column has no string `type`
/// - a foreign key has no `one`/`many` relationship
/// - two tables share a name
///
/// ## Examples
///
/// ```
/// use airtable_schema_gen::normalize::normalize;
/// use serde_json::json;
///
/// let schema = normalize(&json!({
///     "tblA": {
///         "name": "Orders",
///         "columns": [
///             { "name": "Order Name", "type": "text" },
///             { "name": "Customer", "type": "foreignKey",
///               "typeOptions": { "relationship": "one" } }
///         ]
///     }
/// }))
/// .unwrap();
///
/// let orders = schema.table("Orders").unwrap();
/// assert_eq!(orders.columns[1].column_type.as_str(), "foreignKey-one");
/// ```
#[instrument(level = "debug", skip(raw))]
pub fn normalize(raw: &Value) -> Result<Schema, GeneratorError> {
    let entries = raw.as_object().ok_or_else(|| {
        GeneratorError::malformed("", "expected an object keyed by table id")
    })?;

    let mut names_by_id = HashMap::with_capacity(entries.len());
    for (id, entry) in entries {
        let path = format!("/{}", pointer_segment(id));
        let entry = as_object(entry, &path, "table")?;
        names_by_id.insert(id.as_str(), required_str(entry, &path, "name")?);
    }

    let mut schema = Schema::default();
    for (id, entry) in entries {
        let path = format!("/{}", pointer_segment(id));
        let table = normalize_table(entry, &path, &names_by_id)?;
        trace!(table = %table.name, columns = table.columns.len(), "Normalized table");
        schema
            .push(table)
            .map_err(|e| GeneratorError::malformed(format!("{path}/name"), e.to_string()))?;
    }

    debug!(tables = schema.len(), "Normalized schema");
    Ok(schema)
}

fn normalize_table(
    entry: &Value,
    path: &str,
    names_by_id: &HashMap<&str, &str>,
) -> Result<Table, GeneratorError> {
    let entry = as_object(entry, path, "table")?;
    let name = required_str(entry, path, "name")?;

    let columns_path = format!("{path}/columns");
    let raw_columns = entry
        .get("columns")
        .and_then(Value::as_array)
        .ok_or_else(|| GeneratorError::malformed(&columns_path, "expected an array of columns"))?;

    let columns = raw_columns
        .iter()
        .enumerate()
        .map(|(i, column)| normalize_column(column, &format!("{columns_path}/{i}"), names_by_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table::new(name, columns))
}

fn normalize_column(
    column: &Value,
    path: &str,
    names_by_id: &HashMap<&str, &str>,
) -> Result<Column, GeneratorError> {
    let column = as_object(column, path, "column")?;
    let name = required_str(column, path, "name")?;
    let raw_type = required_str(column, path, "type")?;

    if raw_type != ColumnType::FOREIGN_KEY {
        let column_type = match ColumnType::from_str(raw_type) {
            Ok(ty) => ty,
            Err(never) => match never {},
        };
        return Ok(Column::new(name, column_type));
    }

    let relationship = column
        .get("typeOptions")
        .and_then(|options| options.get("relationship"))
        .and_then(Value::as_str)
        .and_then(|r| Cardinality::from_str(r).ok())
        .ok_or_else(|| {
            GeneratorError::malformed(
                format!("{path}/typeOptions/relationship"),
                "foreign key needs a relationship of \"one\" or \"many\"",
            )
        })?;

    let mut normalized = Column::new(name, ColumnType::foreign_key(relationship));
    match foreign_table_id(column).map(|id| (id, names_by_id.get(id))) {
        Some((_, Some(linked))) => normalized = normalized.linked_to(*linked),
        Some((id, None)) => debug!(column = name, foreign_table = id, "Linked table not in payload"),
        None => {}
    }
    Ok(normalized)
}

/// The related table id, from `foreignTable` (id or `{ id }`) or
/// `typeOptions.foreignTableId`.
fn foreign_table_id(column: &Map<String, Value>) -> Option<&str> {
    let from_foreign_table = column.get("foreignTable").and_then(|ft| match ft {
        Value::String(id) => Some(id.as_str()),
        Value::Object(obj) => obj.get("id").and_then(Value::as_str),
        _ => None,
    });
    from_foreign_table.or_else(|| {
        column
            .get("typeOptions")
            .and_then(|options| options.get("foreignTableId"))
            .and_then(Value::as_str)
    })
}

fn as_object<'a>(
    value: &'a Value,
    path: &str,
    what: &str,
) -> Result<&'a Map<String, Value>, GeneratorError> {
    value
        .as_object()
        .ok_or_else(|| GeneratorError::malformed(path, format!("expected a {what} object")))
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a str, GeneratorError> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(GeneratorError::malformed(
            format!("{path}/{key}"),
            "expected a string",
        )),
        None => Err(GeneratorError::malformed(
            format!("{path}/{key}"),
            "missing required field",
        )),
    }
}

/// Escapes a JSON pointer reference token.
fn pointer_segment(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
