//! User-supplied generation hints.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Names that bypass the default trailing-`s` plural heuristic.
///
/// Entries are matched against canonical table identifiers (for example
/// `LineItems`, not `Line Items`).
///
/// ## Examples
///
/// ```
/// use airtable_schema_define::NamingExceptions;
///
/// let exceptions = NamingExceptions::default()
///     .with_pluralize(["Staff"])
///     .with_depluralize(["News"]);
///
/// assert!(exceptions.keeps_plural_form("Staff"));
/// assert!(exceptions.keeps_singular_form("News"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingExceptions {
    /// Names returned unchanged by pluralization.
    pub pluralize: BTreeSet<String>,
    /// Names returned unchanged by depluralization.
    pub depluralize: BTreeSet<String>,
}

impl NamingExceptions {
    /// Adds names that must not be pluralized.
    pub fn with_pluralize<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pluralize.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds names that must not be depluralized.
    pub fn with_depluralize<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depluralize.extend(names.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if `name` is exempt from pluralization.
    pub fn keeps_plural_form(&self, name: &str) -> bool {
        self.pluralize.contains(name)
    }

    /// Returns `true` if `name` is exempt from depluralization.
    pub fn keeps_singular_form(&self, name: &str) -> bool {
        self.depluralize.contains(name)
    }
}

/// Per-table generation hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableMetadata {
    /// Native column names that get a "find by attribute" accessor, in order.
    #[serde(alias = "lookup_fields")]
    pub lookup_fields: Vec<String>,
}

impl TableMetadata {
    /// Creates metadata with the given lookup fields.
    pub fn with_lookup_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lookup_fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}
