//! Thin adapter over `docx-rs`.
//!
//! Owns the loaded document for the duration of one run and collects the
//! handful of text/formatting helpers the passes share, so the rest of the
//! crate never touches the document-object model directly.

use anyhow::{Context, Result};
use docx_rs::*;
use std::fs;
use std::path::Path;

/// The one document loaded, mutated in place by the passes and written out by
/// the save pass.
pub struct TemplateDocument {
    docx: Docx,
    extension: String,
}

impl TemplateDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let buf = fs::read(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        let docx = read_docx(&buf)
            .map_err(|e| anyhow::anyhow!("failed to parse template {}: {}", path.display(), e))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(crate::templates::TEMPLATE_EXTENSION)
            .to_ascii_lowercase();
        Ok(Self { docx, extension })
    }

    pub fn docx_mut(&mut self) -> &mut Docx {
        &mut self.docx
    }

    /// Native extension of the source template, reused for the output file.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Serialize the mutated document to `path`.
    pub fn write_to(self, path: &Path) -> Result<()> {
        let file = fs::File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        self.docx
            .build()
            .pack(file)
            .with_context(|| format!("failed to write document {}", path.display()))?;
        Ok(())
    }
}

/// Concatenated text of a single run.
pub fn run_text(run: &Run) -> String {
    run.children
        .iter()
        .filter_map(|child| match child {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}

/// Replace the entire text of a run with a single text node. Tabs and breaks
/// inside the run are dropped, matching a whole-run overwrite.
pub fn set_run_text(run: &mut Run, text: impl Into<String>) {
    run.children = vec![RunChild::Text(Text::new(text))];
}

/// Mark a run bold in place, preserving its other properties.
pub fn bold_run(run: &mut Run) {
    run.run_property.bold = Some(Bold::new());
    run.run_property.bold_cs = Some(BoldCs::new());
}

/// Concatenated text of a paragraph's runs.
pub fn paragraph_text(paragraph: &Paragraph) -> String {
    paragraph
        .children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run_text(run)),
            _ => None,
        })
        .collect()
}

/// Text of a cell: its paragraphs joined with newlines. Nested tables are not
/// descended into.
pub fn cell_text(cell: &TableCell) -> String {
    cell.children
        .iter()
        .filter_map(|content| match content {
            TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overwrite the entire content of a cell with one plain paragraph holding
/// `text`. Any run-level formatting previously in the cell is lost.
pub fn set_cell_text(cell: &mut TableCell, text: &str) {
    cell.children = vec![TableCellContent::Paragraph(Box::new(
        Paragraph::new().add_run(Run::new().add_text(text)),
    ))];
}

/// Right-align every paragraph in a cell.
pub fn align_cell_right(cell: &mut TableCell) {
    for content in cell.children.iter_mut() {
        if let TableCellContent::Paragraph(p) = content {
            p.property = p.property.clone().align(AlignmentType::Right);
        }
    }
}
