//! Save pass: filename derivation and the overwrite-then-write to the output
//! directory.

use crate::docx::TemplateDocument;
use crate::reference;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default output directory when none is configured: a `docfill/processed`
/// folder under the platform documents directory.
pub fn default_output_dir() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docfill")
        .join("processed")
}

/// Write the mutated document under a filename derived from the generated
/// reference, silently replacing any existing file of the same name. Returns
/// the final path. Nothing is written until this point, so an earlier failure
/// leaves no partial output.
pub fn save_document(
    document: TemplateDocument,
    generated_reference: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let stem = reference::sanitize_file_stem(generated_reference);
    let file_name = format!("{stem}.{}", document.extension());

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(file_name);
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("failed to replace existing file {}", path.display()))?;
    }

    document.write_to(&path)?;
    Ok(path)
}
