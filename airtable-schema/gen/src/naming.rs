//! Canonical identifiers from native Airtable names.
//!
//! These rules produce the vocabulary of the generated code: field keys in
//! canonical records (`orderName`, `customerId`) and the table identifiers
//! that wrapper function names are built from (`LineItems`).
//!
//! ## Rules
//!
//! | Native name | Kind | Canonical identifier |
//! |-------------|------|----------------------|
//! | `Order Name` | text | `orderName` |
//! | `Customer` | foreign key, one | `customerId` |
//! | `Line Items` | foreign key, many | `lineItemIds` |
//! | `Line Items` | table | `LineItems` |

use airtable_schema_define::{Cardinality, Column, NamingExceptions};

/// Characters removed from column identifiers after casing.
fn is_stripped(c: char) -> bool {
    matches!(c, '(' | ')' | '"' | '\'' | '?') || c.is_whitespace()
}

/// Converts a native name into a PascalCase identifier.
///
/// The name is lowercased, split on whitespace, each word's first character
/// is uppercased, and `(`, `)`, `"`, `'` and `?` are removed.
///
/// ## Examples
///
/// ```
/// use airtable_schema_gen::naming::to_identifier;
///
/// assert_eq!(to_identifier("Order Name"), "OrderName");
/// assert_eq!(to_identifier("Is Paid?"), "IsPaid");
/// assert_eq!(to_identifier("SKU"), "Sku");
/// ```
pub fn to_identifier(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .map(upper_first)
        .collect::<String>()
        .chars()
        .filter(|&c| !is_stripped(c))
        .collect()
}

/// Table identifier: the native name without parentheses or whitespace.
///
/// Case is preserved, so `Line Items` becomes `LineItems`.
pub fn table_identifier(name: &str) -> String {
    name.chars()
        .filter(|&c| !matches!(c, '(' | ')') && !c.is_whitespace())
        .collect()
}

/// Canonical field key for a column.
///
/// Foreign-key columns get an `Id` suffix, or `Ids` after depluralizing
/// for multi-record links. The first character is lowercased.
///
/// ## Examples
///
/// ```
/// use airtable_schema_define::{Cardinality, Column, ColumnType, NamingExceptions};
/// use airtable_schema_gen::naming::column_identifier;
///
/// let exceptions = NamingExceptions::default();
/// let customer = Column::new("Customer", ColumnType::foreign_key(Cardinality::One));
/// let items = Column::new("Line Items", ColumnType::foreign_key(Cardinality::Many));
///
/// assert_eq!(column_identifier(&customer, &exceptions), "customerId");
/// assert_eq!(column_identifier(&items, &exceptions), "lineItemIds");
/// ```
pub fn column_identifier(column: &Column, exceptions: &NamingExceptions) -> String {
    let name = to_identifier(&column.name);
    let name = match column.column_type.cardinality() {
        Some(Cardinality::One) => format!("{name}Id"),
        Some(Cardinality::Many) => format!("{}Ids", depluralize(&name, exceptions)),
        None => name,
    };
    lower_first(&name)
}

/// Appends `s` unless `name` is exempt or already ends in `s`.
pub fn pluralize(name: &str, exceptions: &NamingExceptions) -> String {
    if exceptions.keeps_plural_form(name) || name.ends_with('s') {
        name.to_string()
    } else {
        format!("{name}s")
    }
}

/// Removes one trailing `s` unless `name` is exempt.
pub fn depluralize(name: &str, exceptions: &NamingExceptions) -> String {
    match name.strip_suffix('s') {
        Some(stem) if !exceptions.keeps_singular_form(name) => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Lowercases the first character.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtable_schema_define::ColumnType;
    use proptest::prelude::*;

    fn exceptions() -> NamingExceptions {
        NamingExceptions::default()
            .with_pluralize(["Staff"])
            .with_depluralize(["Status", "News"])
    }

    #[test]
    fn to_identifier_lowercases_inner_capitals() {
        assert_eq!(to_identifier("SKU Code"), "SkuCode");
        assert_eq!(to_identifier("  spaced   out  "), "SpacedOut");
    }

    #[test]
    fn to_identifier_strips_quotes_and_parentheses() {
        assert_eq!(to_identifier("(Legacy) Code"), "legacyCode");
        assert_eq!(to_identifier(r#""Quoted" Name"#), "quotedName");
        assert_eq!(to_identifier("O'Brien"), "Obrien");
    }

    #[test]
    fn to_identifier_is_idempotent_on_clean_names() {
        for name in ["Name", "Total", "Orders"] {
            assert_eq!(to_identifier(&to_identifier(name)), to_identifier(name));
        }
    }

    #[test]
    fn to_identifier_can_be_empty() {
        assert_eq!(to_identifier("(?)"), "");
    }

    #[test]
    fn table_identifier_preserves_case() {
        assert_eq!(table_identifier("Line Items"), "LineItems");
        assert_eq!(table_identifier("Orders (2024)"), "Orders2024");
        assert_eq!(table_identifier("CRMContacts"), "CRMContacts");
    }

    #[test]
    fn scalar_column_identifier() {
        let column = Column::new("Order Name", ColumnType::Text);
        assert_eq!(column_identifier(&column, &exceptions()), "orderName");
    }

    #[test]
    fn many_link_respects_depluralize_exceptions() {
        let column = Column::new("Status", ColumnType::foreign_key(Cardinality::Many));
        assert_eq!(column_identifier(&column, &exceptions()), "statusIds");
    }

    #[test]
    fn pluralize_rules() {
        assert_eq!(pluralize("Order", &exceptions()), "Orders");
        assert_eq!(pluralize("Orders", &exceptions()), "Orders");
        assert_eq!(pluralize("Staff", &exceptions()), "Staff");
    }

    #[test]
    fn depluralize_rules() {
        assert_eq!(depluralize("Orders", &exceptions()), "Order");
        assert_eq!(depluralize("Order", &exceptions()), "Order");
        assert_eq!(depluralize("News", &exceptions()), "News");
        assert_eq!(depluralize("", &exceptions()), "");
    }

    #[test]
    fn lower_first_handles_empty() {
        assert_eq!(lower_first(""), "");
        assert_eq!(lower_first("OrderName"), "orderName");
    }

    proptest! {
        #[test]
        fn depluralize_inverts_pluralize(name in "[A-Za-z]{0,11}[A-Za-rt-z]") {
            let exceptions = exceptions();
            prop_assume!(!exceptions.keeps_plural_form(&name));
            prop_assume!(!exceptions.keeps_singular_form(&name));

            let plural = pluralize(&name, &exceptions);
            prop_assume!(!exceptions.keeps_singular_form(&plural));
            prop_assert_eq!(depluralize(&plural, &exceptions), name);
        }
    }
}
