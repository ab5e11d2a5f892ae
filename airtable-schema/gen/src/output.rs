//! Validation, formatting and file writing for generated code.
//!
//! ## Output Structure
//!
//! One generation run writes a self-contained module tree:
//! ```text
//! output/
//! ├── mod.rs        # Declares the three modules below
//! ├── schema.rs     # Tables enum, embedded schemas, column constants
//! ├── airtable.rs   # Native-format bindings per table
//! ├── request.rs    # Canonical CRUD functions
//! └── schema.json   # Canonical schema snapshot, read back on the next run
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use tracing::{debug, info};

use crate::codegen::GeneratedArtifacts;
use crate::errors::GeneratorError;

/// Validates that generated code is syntactically correct.
///
/// Parses the token stream as a complete Rust file using `syn`.
///
/// ## Errors
///
/// Returns [`GeneratorError::CodeGenError`] if the tokens do not form a
/// valid Rust file.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {e}")))
}

/// Formats generated code using prettyplease.
///
/// Prepends an auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by airtable-schema-gen. Do not edit manually.\n\n{formatted}"
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// The temp file sits next to the target as `<file name>.tmp`, so readers
/// see either the old or the new content, never a mix.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Writes every generated file into `output_dir`.
///
/// In dry-run mode each file is printed to stdout under a `=== name ===`
/// banner and nothing touches the disk.
///
/// ## Returns
///
/// The paths written, in write order. Empty in dry-run mode.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] on the first file that cannot be
/// written. Files written before it are left in place.
pub fn write_artifacts(
    artifacts: &GeneratedArtifacts,
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<PathBuf>, GeneratorError> {
    if dry_run {
        for file in &artifacts.files {
            println!("=== {} ===\n{}\n", file.file_name, file.contents);
        }
        return Ok(Vec::new());
    }

    let mut written = Vec::with_capacity(artifacts.files.len());
    for file in &artifacts.files {
        let path = output_dir.join(file.file_name);
        write_atomic(&path, &file.contents)?;
        debug!(path = %path.display(), bytes = file.contents.len(), "Wrote file");
        written.push(path);
    }

    info!(files = written.len(), dir = %output_dir.display(), "Wrote generated modules");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GeneratedFile;
    use quote::quote;
    use tempfile::TempDir;

    fn artifacts() -> GeneratedArtifacts {
        GeneratedArtifacts {
            files: vec![
                GeneratedFile {
                    file_name: "schema.rs",
                    contents: "pub const A: u8 = 1;\n".to_string(),
                },
                GeneratedFile {
                    file_name: "schema.json",
                    contents: "{}\n".to_string(),
                },
            ],
        }
    }

    // === validate_code tests ===

    #[test]
    fn validate_code_accepts_valid_code() {
        let tokens = quote! {
            pub async fn f() -> Result<(), ()> { Ok(()) }
        };
        assert!(validate_code(&tokens).is_ok());
    }

    #[test]
    fn validate_code_rejects_invalid_code() {
        let invalid_tokens = quote! {
            let x =
        };

        match validate_code(&invalid_tokens) {
            Err(GeneratorError::CodeGenError(msg)) => {
                assert!(msg.starts_with("Generated code is invalid"));
            }
            Err(other) => panic!("Unexpected error type: {other:?}"),
            Ok(_) => panic!("Expected error but got success"),
        }
    }

    // === format_code tests ===

    #[test]
    fn format_code_adds_header() {
        let file = validate_code(&quote! { pub struct Foo; }).unwrap();
        let formatted = format_code(&file);

        assert!(formatted.starts_with(
            "// This code was automatically generated by airtable-schema-gen. Do not edit manually."
        ));
        assert!(formatted.contains("pub struct Foo;"));
    }

    // === write_atomic tests ===

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("deep").join("mod.rs");

        write_atomic(&path, "// hi\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "// hi\n");
        assert!(!temp.path().join("nested/deep/mod.rs.tmp").exists());
    }

    #[test]
    fn write_atomic_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("schema.rs");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_atomic_reports_unwritable_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "").unwrap();

        let err = write_atomic(&blocker.join("child.rs"), "x").unwrap_err();
        assert!(matches!(err, GeneratorError::WriteError { .. }));
    }

    // === write_artifacts tests ===

    #[test]
    fn write_artifacts_writes_every_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let written = write_artifacts(&artifacts(), &out, false).unwrap();

        assert_eq!(written, [out.join("schema.rs"), out.join("schema.json")]);
        assert_eq!(fs::read_to_string(out.join("schema.json")).unwrap(), "{}\n");
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let written = write_artifacts(&artifacts(), &out, true).unwrap();

        assert!(written.is_empty());
        assert!(!out.exists());
    }
}
