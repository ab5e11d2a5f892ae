//! Column and column type definitions.
//!
//! Airtable describes a column type with a verbose descriptor; the canonical
//! model flattens it into [`ColumnType`]. Relationship columns encode their
//! cardinality directly in the type so later stages never have to infer it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How many records a foreign-key column links to.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use airtable_schema_define::Cardinality;
///
/// assert_eq!(Cardinality::from_str("many").unwrap(), Cardinality::Many);
/// assert_eq!(Cardinality::One.to_string(), "one");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cardinality {
    /// Links at most one related record.
    One,
    /// Links any number of related records.
    Many,
}

/// Flattened column type.
///
/// The well-known Airtable types get their own variant. Anything else is kept
/// verbatim in [`ColumnType::Other`] so unfamiliar types pass through
/// normalization untouched.
///
/// Serialized as its string form (`"text"`, `"foreignKey-one"`, ...).
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use airtable_schema_define::{Cardinality, ColumnType};
///
/// let ty = ColumnType::from_str("foreignKey-many").unwrap();
/// assert_eq!(ty, ColumnType::ForeignKeyMany);
/// assert_eq!(ty.cardinality(), Some(Cardinality::Many));
///
/// let custom = ColumnType::from_str("barcode").unwrap();
/// assert_eq!(custom, ColumnType::Other("barcode".to_string()));
/// assert_eq!(custom.as_str(), "barcode");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ColumnType {
    /// Single line text.
    Text,
    /// Long text.
    MultilineText,
    /// Long text with formatting.
    RichText,
    /// Integer or decimal number.
    Number,
    /// Boolean checkbox.
    Checkbox,
    /// Date or date-time.
    Date,
    /// Single select.
    Select,
    /// Multiple select.
    MultiSelect,
    /// Computed formula.
    Formula,
    /// Rollup over linked records.
    Rollup,
    /// Lookup of a field on linked records.
    Lookup,
    /// Attachments.
    MultipleAttachment,
    /// Link to at most one record in another table.
    ForeignKeyOne,
    /// Link to any number of records in another table.
    ForeignKeyMany,
    /// Any type without a dedicated variant.
    Other(String),
}

impl ColumnType {
    /// Base type name Airtable uses for relationship columns.
    pub const FOREIGN_KEY: &'static str = "foreignKey";

    /// Builds the foreign-key variant for the given cardinality.
    pub fn foreign_key(cardinality: Cardinality) -> Self {
        match cardinality {
            Cardinality::One => Self::ForeignKeyOne,
            Cardinality::Many => Self::ForeignKeyMany,
        }
    }

    /// Returns the string form of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::MultilineText => "multilineText",
            Self::RichText => "richText",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Select => "select",
            Self::MultiSelect => "multiSelect",
            Self::Formula => "formula",
            Self::Rollup => "rollup",
            Self::Lookup => "lookup",
            Self::MultipleAttachment => "multipleAttachment",
            Self::ForeignKeyOne => "foreignKey-one",
            Self::ForeignKeyMany => "foreignKey-many",
            Self::Other(name) => name,
        }
    }

    /// Returns the cardinality for foreign-key types, `None` otherwise.
    pub fn cardinality(&self) -> Option<Cardinality> {
        match self {
            Self::ForeignKeyOne => Some(Cardinality::One),
            Self::ForeignKeyMany => Some(Cardinality::Many),
            _ => None,
        }
    }

    /// Returns `true` for either foreign-key variant.
    pub fn is_foreign_key(&self) -> bool {
        self.cardinality().is_some()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = std::convert::Infallible;

    /// Parses a type name. Never fails; unknown names become [`ColumnType::Other`].
    ///
    /// Accepts the concatenated `foreignKeyone` / `foreignKeymany` spellings
    /// written by earlier snapshots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "text" => Self::Text,
            "multilineText" => Self::MultilineText,
            "richText" => Self::RichText,
            "number" => Self::Number,
            "checkbox" => Self::Checkbox,
            "date" => Self::Date,
            "select" => Self::Select,
            "multiSelect" => Self::MultiSelect,
            "formula" => Self::Formula,
            "rollup" => Self::Rollup,
            "lookup" => Self::Lookup,
            "multipleAttachment" => Self::MultipleAttachment,
            "foreignKey-one" | "foreignKeyone" => Self::ForeignKeyOne,
            "foreignKey-many" | "foreignKeymany" => Self::ForeignKeyMany,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        match value {
            ColumnType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A single column as stored by Airtable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Native column name, used verbatim on the wire.
    pub name: String,
    /// Flattened column type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Native name of the linked table, for foreign keys whose target resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_table: Option<String>,
}

impl Column {
    /// Creates a column with no linked table.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            linked_table: None,
        }
    }

    /// Sets the linked table name.
    pub fn linked_to(mut self, table: impl Into<String>) -> Self {
        self.linked_table = Some(table.into());
        self
    }

    /// Returns `true` for relationship columns.
    pub fn is_foreign_key(&self) -> bool {
        self.column_type.is_foreign_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_round_trip_through_strings() {
        for name in ["text", "number", "checkbox", "multipleAttachment", "foreignKey-one"] {
            let ty: ColumnType = name.parse().unwrap();
            assert_eq!(ty.as_str(), name);
            assert!(!matches!(ty, ColumnType::Other(_)), "{name} should be known");
        }
    }

    #[test]
    fn legacy_foreign_key_spelling_is_accepted() {
        assert_eq!(
            "foreignKeyone".parse::<ColumnType>().unwrap(),
            ColumnType::ForeignKeyOne
        );
        assert_eq!(
            "foreignKeymany".parse::<ColumnType>().unwrap(),
            ColumnType::ForeignKeyMany
        );
    }

    #[test]
    fn unknown_type_passes_through() {
        let ty: ColumnType = "autoNumber".parse().unwrap();
        assert_eq!(ty, ColumnType::Other("autoNumber".to_string()));
        assert!(!ty.is_foreign_key());
    }

    #[test]
    fn foreign_key_constructor_matches_cardinality() {
        assert_eq!(
            ColumnType::foreign_key(Cardinality::One),
            ColumnType::ForeignKeyOne
        );
        assert_eq!(
            ColumnType::foreign_key(Cardinality::Many).cardinality(),
            Some(Cardinality::Many)
        );
    }

    #[test]
    fn column_serializes_type_as_string() {
        let column = Column::new("Customer", ColumnType::ForeignKeyOne).linked_to("Customers");
        let json = serde_json::to_value(&column).unwrap();

        assert_eq!(json["name"], "Customer");
        assert_eq!(json["type"], "foreignKey-one");
        assert_eq!(json["linkedTable"], "Customers");

        let back: Column = serde_json::from_value(json).unwrap();
        assert_eq!(back, column);
    }

    #[test]
    fn column_without_link_omits_field() {
        let column = Column::new("Notes", ColumnType::MultilineText);
        let json = serde_json::to_string(&column).unwrap();
        assert!(!json.contains("linkedTable"));
    }
}
