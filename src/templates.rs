//! Template discovery: scan a directory (non-recursively) for documents with
//! the native extension and resolve a selected name to a full path.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Native extension of the documents this tool processes.
pub const TEMPLATE_EXTENSION: &str = "docx";

#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub name: String,
    pub path: PathBuf,
}

/// List selectable templates in `dir`, sorted by filename. Subdirectories and
/// files with other extensions are ignored.
pub fn list_templates(dir: &Path) -> Result<Vec<TemplateEntry>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read template directory {}", dir.display()))?;

    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!("failed to read entry in template directory {}", dir.display())
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_template = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION));
        if !is_template {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            templates.push(TemplateEntry {
                name: name.to_string(),
                path: path.clone(),
            });
        }
    }
    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

/// Resolve a selected template name to its full path, listing the available
/// names when the selection does not exist.
pub fn resolve_template(dir: &Path, name: &str) -> Result<PathBuf> {
    let templates = list_templates(dir)?;
    if let Some(entry) = templates.iter().find(|t| t.name == name) {
        return Ok(entry.path.clone());
    }
    let available: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    if available.is_empty() {
        bail!(
            "template '{}' not found; no .{} files in {}",
            name,
            TEMPLATE_EXTENSION,
            dir.display()
        );
    }
    bail!(
        "template '{}' not found; available: {}",
        name,
        available.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_only_docx_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.docx"), b"x").unwrap();
        fs::write(dir.path().join("a.docx"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested.docx")).unwrap();

        let names: Vec<String> = list_templates(dir.path())
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["a.docx", "b.docx"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Upper.DOCX"), b"x").unwrap();

        let templates = list_templates(dir.path()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Upper.DOCX");
    }

    #[test]
    fn resolves_selected_name_to_full_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("quote.docx"), b"x").unwrap();

        let path = resolve_template(dir.path(), "quote.docx").unwrap();
        assert_eq!(path, dir.path().join("quote.docx"));
    }

    #[test]
    fn missing_selection_lists_available_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("quote.docx"), b"x").unwrap();

        let err = resolve_template(dir.path(), "other.docx").unwrap_err();
        assert!(err.to_string().contains("quote.docx"));
    }
}
