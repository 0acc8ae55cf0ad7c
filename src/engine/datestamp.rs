use crate::model::{InfoEvent, Location, Pass, PassEvent};
use docx_rs::{Docx, DocumentChild, Paragraph, Run, TableCellContent, TableChild, TableRowChild};
use std::sync::mpsc::Sender;

/// Label marking the row above the date cell on the first page.
const SUBMISSION_DATE_LABEL: &str = "Submission Date";

/// Half-point font size of the stamped date (9 pt).
const STAMP_SIZE: usize = 18;
const STAMP_COLOR: &str = "FFFFFF";

/// Find the first table row whose first cell contains `Submission Date` and
/// overwrite the first-column cell of the row below it with `stamp`, styled
/// 9 pt bold white. Stops after the first update. A label in the last row of
/// its table has no row below and the scan moves on; never finding a usable
/// label is a reported no-op.
pub(crate) fn stamp_submission_date(
    docx: &mut Docx,
    stamp: &str,
    event_tx: &Sender<PassEvent>,
) -> bool {
    for child in docx.document.children.iter_mut() {
        let DocumentChild::Table(table) = child else {
            continue;
        };

        let mut target_row: Option<usize> = None;
        for (i, row_child) in table.rows.iter().enumerate() {
            let TableChild::TableRow(row) = row_child;
            let first_cell_text = row
                .cells
                .first()
                .map(|TableRowChild::TableCell(cell)| crate::docx::cell_text(cell))
                .unwrap_or_default();
            if first_cell_text.contains(SUBMISSION_DATE_LABEL) && i + 1 < table.rows.len() {
                target_row = Some(i + 1);
                break;
            }
        }

        if let Some(i) = target_row {
            let TableChild::TableRow(row) = &mut table.rows[i];
            if let Some(TableRowChild::TableCell(cell)) = row.cells.first_mut() {
                cell.children = vec![TableCellContent::Paragraph(Box::new(
                    Paragraph::new().add_run(
                        Run::new()
                            .add_text(stamp)
                            .size(STAMP_SIZE)
                            .bold()
                            .color(STAMP_COLOR),
                    ),
                ))];
                let _ = event_tx.send(PassEvent::Replaced {
                    pass: Pass::DateStamp,
                    location: Location::TableCell,
                    text: stamp.to_string(),
                });
                return true;
            }
        }
    }

    let _ = event_tx.send(PassEvent::Info(InfoEvent::SubmissionDateRowNotFound));
    false
}
