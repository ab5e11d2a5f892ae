//! Per-file declaration lists.
//!
//! Generators never concatenate source text. They append named declarations
//! to an [`Artifact`], which rejects a second declaration under a name that
//! is already taken, and renders the whole list in one formatting pass.

use proc_macro2::TokenStream;
use quote::quote;

use crate::errors::GeneratorError;
use crate::output::{format_code, validate_code};

/// A top-level item of a generated file.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Rust item name (function, module, constant or type).
    pub name: String,
    /// Native name the item was derived from, for collision reports.
    pub source: String,
    /// The item itself.
    pub tokens: TokenStream,
}

/// An ordered list of declarations that becomes one generated file.
///
/// ## Examples
///
/// ```
/// use airtable_schema_gen::codegen::Artifact;
/// use quote::quote;
///
/// let mut artifact = Artifact::new("request.rs", quote! { #![doc = " Requests."] });
/// artifact.declare("create_order", "Orders", quote! { pub fn create_order() {} }).unwrap();
///
/// let err = artifact
///     .declare("create_order", "Order", quote! { pub fn create_order() {} })
///     .unwrap_err();
/// assert!(err.to_string().contains("'Orders' and 'Order'"));
/// ```
#[derive(Debug, Clone)]
pub struct Artifact {
    file_name: &'static str,
    docs: TokenStream,
    imports: Vec<TokenStream>,
    declarations: Vec<Declaration>,
}

impl Artifact {
    /// Creates an empty artifact with its module documentation.
    pub fn new(file_name: &'static str, docs: TokenStream) -> Self {
        Self {
            file_name,
            docs,
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// File name this artifact renders to.
    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Adds a `use` item. Imports render after the module docs, before any
    /// declaration.
    pub fn import(&mut self, tokens: TokenStream) {
        self.imports.push(tokens);
    }

    /// Appends a declaration.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::IdentifierCollision`] if `name` is already
    /// declared in this artifact, naming both sources.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
        tokens: TokenStream,
    ) -> Result<(), GeneratorError> {
        let name = name.into();
        let source = source.into();
        if let Some(existing) = self.declarations.iter().find(|d| d.name == name) {
            return Err(GeneratorError::IdentifierCollision {
                namespace: format!("items of {}", self.file_name),
                identifier: name,
                first: existing.source.clone(),
                second: source,
            });
        }
        self.declarations.push(Declaration {
            name,
            source,
            tokens,
        });
        Ok(())
    }

    /// Declared item names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.name.as_str())
    }

    /// The complete file as tokens.
    pub fn tokens(&self) -> TokenStream {
        let docs = &self.docs;
        let imports = &self.imports;
        let items = self.declarations.iter().map(|d| &d.tokens);
        quote! {
            #docs
            #(#imports)*
            #(#items)*
        }
    }

    /// Validates and formats the file.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::CodeGenError`] if the tokens do not parse
    /// as a Rust file.
    pub fn render(&self) -> Result<String, GeneratorError> {
        let file = validate_code(&self.tokens())?;
        Ok(format_code(&file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> Artifact {
        Artifact::new("schema.rs", quote! { #![doc = " Test module."] })
    }

    #[test]
    fn keeps_declaration_order() {
        let mut artifact = artifact();
        artifact.declare("b", "B", quote! { pub const B: u8 = 2; }).unwrap();
        artifact.declare("a", "A", quote! { pub const A: u8 = 1; }).unwrap();

        assert_eq!(artifact.names().collect::<Vec<_>>(), ["b", "a"]);
        let rendered = artifact.render().unwrap();
        assert!(rendered.find("const B").unwrap() < rendered.find("const A").unwrap());
    }

    #[test]
    fn collision_names_both_sources() {
        let mut artifact = artifact();
        artifact.declare("orders", "Orders", quote! { pub mod orders {} }).unwrap();
        let err = artifact
            .declare("orders", "Orders ", quote! { pub mod orders {} })
            .unwrap_err();

        match err {
            GeneratorError::IdentifierCollision {
                identifier,
                first,
                second,
                ..
            } => {
                assert_eq!(identifier, "orders");
                assert_eq!(first, "Orders");
                assert_eq!(second, "Orders ");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn imports_precede_declarations() {
        let mut artifact = artifact();
        artifact.declare("f", "F", quote! { pub fn f() -> HashMap<u8, u8> { HashMap::new() } }).unwrap();
        artifact.import(quote! { use std::collections::HashMap; });

        let rendered = artifact.render().unwrap();
        assert!(rendered.find("use std::collections::HashMap").unwrap() < rendered.find("pub fn f").unwrap());
    }

    #[test]
    fn render_has_generated_header_and_docs() {
        let rendered = artifact().render().unwrap();
        assert!(rendered.starts_with("// This code was automatically generated"));
        assert!(rendered.contains("//! Test module."));
    }
}
