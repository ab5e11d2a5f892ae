//! Rust item names from canonical identifiers.
//!
//! Canonical identifiers (`LineItems`, `customerId`) may still contain
//! characters Rust rejects (`E-mail`, `#`). The helpers here split them into
//! words, drop anything that is not ASCII alphanumeric, and escape the result
//! so it is always a valid identifier for `format_ident!`.

/// Strict and reserved keywords that can be written as raw identifiers.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers; these get a trailing underscore.
const UNRAWABLE_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Splits a camelCase or PascalCase string into words.
///
/// A new word starts at an uppercase letter that follows a lowercase letter
/// or digit, or at the last uppercase letter of an acronym that is followed
/// by a lowercase letter.
///
/// ## Examples
///
/// ```
/// use airtable_schema_gen::case::split_camel_case;
///
/// assert_eq!(split_camel_case("LineItems"), vec!["Line", "Items"]);
/// assert_eq!(split_camel_case("HTTPStatus"), vec!["HTTP", "Status"]);
/// assert_eq!(split_camel_case("customerId"), vec!["customer", "Id"]);
/// ```
pub fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;

        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if offset > word_start {
                words.push(&s[word_start..offset]);
            }
            word_start = offset;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

/// Words of `s`, split on non-alphanumeric characters and camel-case
/// boundaries. Non-ASCII characters are dropped.
fn words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .flat_map(split_camel_case)
        .collect()
}

/// Converts to `snake_case` without keyword escaping.
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts to `SCREAMING_SNAKE_CASE` without keyword escaping.
pub fn to_screaming_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts to `UpperCamelCase` without keyword escaping.
pub fn to_upper_camel_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Makes `name` usable as a Rust identifier.
///
/// - a leading digit gets a `_` prefix
/// - keywords become raw identifiers (`r#type`)
/// - `self`, `Self`, `super` and `crate` get a `_` suffix
///
/// Empty input stays empty; callers report that as an error.
pub fn escape_ident(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else if RAW_KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else if UNRAWABLE_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// `snake_case` Rust identifier for modules and functions.
pub fn snake_ident(s: &str) -> String {
    escape_ident(to_snake_case(s))
}

/// `SCREAMING_SNAKE_CASE` Rust identifier for constants and statics.
pub fn screaming_ident(s: &str) -> String {
    escape_ident(to_screaming_snake_case(s))
}

/// `UpperCamelCase` Rust identifier for enum variants.
pub fn camel_ident(s: &str) -> String {
    escape_ident(to_upper_camel_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    // === split_camel_case tests ===

    #[test]
    fn split_camel_case_multi_word() {
        assert_eq!(split_camel_case("OrderLineItems"), vec!["Order", "Line", "Items"]);
    }

    #[test]
    fn split_camel_case_with_acronym() {
        assert_eq!(split_camel_case("CustomerURL"), vec!["Customer", "URL"]);
    }

    #[test]
    fn split_camel_case_digit_boundary() {
        assert_eq!(split_camel_case("Q1Sales"), vec!["Q1", "Sales"]);
    }

    #[test]
    fn split_camel_case_single_word() {
        assert_eq!(split_camel_case("Orders"), vec!["Orders"]);
        assert_eq!(split_camel_case("orders"), vec!["orders"]);
    }

    #[test]
    fn split_camel_case_empty() {
        assert_eq!(split_camel_case(""), Vec::<&str>::new());
    }

    #[test]
    fn split_camel_case_non_ascii_is_char_safe() {
        assert_eq!(split_camel_case("caféBar"), vec!["café", "Bar"]);
    }

    // === case conversion tests ===

    #[test]
    fn snake_case_from_identifiers() {
        assert_eq!(to_snake_case("LineItems"), "line_items");
        assert_eq!(to_snake_case("customerId"), "customer_id");
        assert_eq!(to_snake_case("e-mail"), "e_mail");
    }

    #[test]
    fn screaming_case_from_identifiers() {
        assert_eq!(to_screaming_snake_case("orderName"), "ORDER_NAME");
        assert_eq!(to_screaming_snake_case("lineItemIds"), "LINE_ITEM_IDS");
    }

    #[test]
    fn upper_camel_case_from_identifiers() {
        assert_eq!(to_upper_camel_case("LineItems"), "LineItems");
        assert_eq!(to_upper_camel_case("line-items"), "LineItems");
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(to_snake_case("Café"), "caf");
        assert_eq!(to_snake_case("#%"), "");
    }

    // === escape_ident tests ===

    #[test]
    fn keywords_become_raw() {
        assert_eq!(snake_ident("type"), "r#type");
        assert_eq!(snake_ident("Match"), "r#match");
    }

    #[test]
    fn unrawable_keywords_get_suffix() {
        assert_eq!(snake_ident("self"), "self_");
        assert_eq!(camel_ident("self"), "Self_");
    }

    #[test]
    fn leading_digit_gets_prefix() {
        assert_eq!(screaming_ident("2024Totals"), "_2024_TOTALS");
        assert_eq!(snake_ident("2024"), "_2024");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(snake_ident("()"), "");
    }
}
