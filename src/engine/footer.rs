use crate::docx;
use crate::model::{InfoEvent, Location, Pass, PassEvent};
use docx_rs::{Docx, Footer, FooterChild, TableChild, TableRowChild};
use std::sync::mpsc::Sender;

/// Overwrite the first footer table cell containing `marker` with the new
/// reference string and right-align the cell's paragraphs.
///
/// Process-first-match-only is deliberate policy: once one cell is updated
/// the scan stops entirely, so a template carrying the marker in several
/// footer cells is only touched once. No match anywhere is a reported no-op.
pub(crate) fn update_footer_reference(
    docx: &mut Docx,
    marker: &str,
    reference: &str,
    event_tx: &Sender<PassEvent>,
) -> bool {
    let section = &mut docx.document.section_property;
    let footers = [
        section.footer.as_mut(),
        section.first_footer.as_mut(),
        section.even_footer.as_mut(),
    ];
    for (_rid, footer) in footers.into_iter().flatten() {
        if update_in_footer(footer, marker, reference, event_tx) {
            return true;
        }
    }
    let _ = event_tx.send(PassEvent::Info(InfoEvent::FooterMarkerNotFound {
        marker: marker.to_string(),
    }));
    false
}

fn update_in_footer(
    footer: &mut Footer,
    marker: &str,
    reference: &str,
    event_tx: &Sender<PassEvent>,
) -> bool {
    for child in footer.children.iter_mut() {
        let FooterChild::Table(table) = child else {
            continue;
        };
        for row_child in table.rows.iter_mut() {
            let TableChild::TableRow(row) = row_child;
            for cell_child in row.cells.iter_mut() {
                let TableRowChild::TableCell(cell) = cell_child;
                if !docx::cell_text(cell).contains(marker) {
                    continue;
                }
                // Full overwrite, not a substring replace: the old reference
                // must not survive alongside the new one.
                docx::set_cell_text(cell, reference);
                docx::align_cell_right(cell);
                let _ = event_tx.send(PassEvent::Replaced {
                    pass: Pass::FooterReference,
                    location: Location::FooterCell,
                    text: reference.to_string(),
                });
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{
        AlignmentType, Paragraph, ParagraphProperty, Run, Table, TableCell, TableCellContent,
        TableRow,
    };
    use std::sync::mpsc;

    fn footer_cells(docx: &Docx) -> Vec<&TableCell> {
        let mut cells = Vec::new();
        let Some((_, footer)) = docx.document.section_property.footer.as_ref() else {
            return cells;
        };
        for child in &footer.children {
            if let FooterChild::Table(table) = child {
                for row_child in &table.rows {
                    let TableChild::TableRow(row) = row_child;
                    for cell_child in &row.cells {
                        let TableRowChild::TableCell(cell) = cell_child;
                        cells.push(cell);
                    }
                }
            }
        }
        cells
    }

    fn reference_cell(text: &str) -> TableCell {
        TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
    }

    #[test]
    fn overwrites_whole_cell_and_right_aligns() {
        let table = Table::new(vec![TableRow::new(vec![
            reference_cell("left column"),
            reference_cell("Ref.: Old_Thing_1_010101 and trailing junk"),
        ])]);
        let mut docx = Docx::new().footer(Footer::new().add_table(table));
        let (tx, _rx) = mpsc::channel();

        let updated =
            update_footer_reference(&mut docx, "Ref.: ", "Ref.: Acme_MDM_12345_050125", &tx);
        assert!(updated);

        let cells = footer_cells(&docx);
        assert_eq!(docx::cell_text(cells[0]), "left column");
        // No residual old text.
        assert_eq!(docx::cell_text(cells[1]), "Ref.: Acme_MDM_12345_050125");

        let expected = ParagraphProperty::new().align(AlignmentType::Right).alignment;
        for content in &cells[1].children {
            if let TableCellContent::Paragraph(p) = content {
                assert_eq!(p.property.alignment, expected);
            }
        }
    }

    #[test]
    fn stops_after_first_matching_cell() {
        let table = Table::new(vec![
            TableRow::new(vec![reference_cell("Ref.: first")]),
            TableRow::new(vec![reference_cell("Ref.: second")]),
        ]);
        let mut docx = Docx::new().footer(Footer::new().add_table(table));
        let (tx, _rx) = mpsc::channel();

        assert!(update_footer_reference(&mut docx, "Ref.: ", "Ref.: New", &tx));

        let cells = footer_cells(&docx);
        assert_eq!(docx::cell_text(cells[0]), "Ref.: New");
        assert_eq!(docx::cell_text(cells[1]), "Ref.: second");
    }

    #[test]
    fn no_marker_anywhere_is_a_reported_no_op() {
        let table = Table::new(vec![TableRow::new(vec![reference_cell("page 1 of 2")])]);
        let mut docx = Docx::new().footer(Footer::new().add_table(table));
        let (tx, rx) = mpsc::channel();

        assert!(!update_footer_reference(&mut docx, "Ref.: ", "Ref.: New", &tx));
        drop(tx);
        let reported = rx.try_iter().any(|ev| {
            matches!(
                ev,
                PassEvent::Info(InfoEvent::FooterMarkerNotFound { ref marker }) if marker == "Ref.: "
            )
        });
        assert!(reported);
    }

    #[test]
    fn document_without_footer_is_a_no_op() {
        let mut docx = Docx::new();
        let (tx, _rx) = mpsc::channel();
        assert!(!update_footer_reference(&mut docx, "Ref.: ", "Ref.: New", &tx));
    }
}
