//! Airtable formula construction.
//!
//! Values are embedded in single-quoted string literals, so quotes and
//! backslashes are escaped before interpolation.

/// Escapes `value` for use inside a single-quoted formula literal.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Formula matching records whose `column` equals `value`.
///
/// ## Examples
///
/// ```
/// use airtable_schema::formula::field_equals;
///
/// assert_eq!(field_equals("Status", "Open"), "{Status}='Open'");
/// ```
pub fn field_equals(column: &str, value: &str) -> String {
    format!("{{{column}}}='{}'", escape_string(value))
}

/// Formula matching any record whose id is in `ids`.
///
/// The trailing `1 < 0` term keeps the formula well formed when `ids` is
/// empty; it then matches nothing.
///
/// ## Examples
///
/// ```
/// use airtable_schema::formula::records_by_ids;
///
/// assert_eq!(
///     records_by_ids(&["recA", "recB"]),
///     "OR(RECORD_ID()='recA', RECORD_ID()='recB', 1 < 0)"
/// );
/// assert_eq!(records_by_ids::<&str>(&[]), "OR(1 < 0)");
/// ```
pub fn records_by_ids<S: AsRef<str>>(ids: &[S]) -> String {
    let mut terms: Vec<String> = ids
        .iter()
        .map(|id| format!("RECORD_ID()='{}'", escape_string(id.as_ref())))
        .collect();
    terms.push("1 < 0".to_string());
    format!("OR({})", terms.join(", "))
}

/// Combines an optional caller filter with `formula`.
///
/// A missing or blank filter yields `formula` unchanged; otherwise
/// `AND(filter, formula)`.
pub fn and(filter: Option<&str>, formula: String) -> String {
    match filter.map(str::trim) {
        Some(filter) if !filter.is_empty() => format!("AND({filter}, {formula})"),
        _ => formula,
    }
}
