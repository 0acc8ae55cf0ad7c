use crate::docx;
use crate::model::{Location, Pass, PassEvent};
use docx_rs::{DocumentChild, Docx, ParagraphChild, TableChild, TableRowChild};
use std::sync::mpsc::Sender;

/// Replace every occurrence of the placeholder token in body paragraph runs
/// and top-level table cells. Runs that contained the token are marked bold;
/// cell replacement overwrites the whole cell and loses run-level formatting.
/// Returns the number of occurrences replaced. Absence of the token is not an
/// error.
pub(crate) fn replace_placeholder(
    docx: &mut Docx,
    token: &str,
    replacement: &str,
    event_tx: &Sender<PassEvent>,
) -> usize {
    if token.is_empty() {
        return 0;
    }

    let mut total = 0usize;
    for child in docx.document.children.iter_mut() {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                let mut replaced_in_paragraph = false;
                for pchild in paragraph.children.iter_mut() {
                    if let ParagraphChild::Run(run) = pchild {
                        let text = docx::run_text(run);
                        let count = text.matches(token).count();
                        if count == 0 {
                            continue;
                        }
                        docx::set_run_text(run, text.replace(token, replacement));
                        docx::bold_run(run);
                        total += count;
                        replaced_in_paragraph = true;
                    }
                }
                if replaced_in_paragraph {
                    let _ = event_tx.send(PassEvent::Replaced {
                        pass: Pass::Placeholder,
                        location: Location::ParagraphRun,
                        text: docx::paragraph_text(paragraph),
                    });
                }
            }
            DocumentChild::Table(table) => {
                for row_child in table.rows.iter_mut() {
                    let TableChild::TableRow(row) = row_child;
                    for cell_child in row.cells.iter_mut() {
                        let TableRowChild::TableCell(cell) = cell_child;
                        let text = docx::cell_text(cell);
                        let count = text.matches(token).count();
                        if count == 0 {
                            continue;
                        }
                        let new_text = text.replace(token, replacement);
                        docx::set_cell_text(cell, &new_text);
                        total += count;
                        let _ = event_tx.send(PassEvent::Replaced {
                            pass: Pass::Placeholder,
                            location: Location::TableCell,
                            text: new_text,
                        });
                    }
                }
            }
            _ => {}
        }
    }
    total
}
