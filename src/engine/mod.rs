mod datestamp;
mod footer;
mod placeholder;
mod year;

use crate::docx::TemplateDocument;
use crate::model::{InfoEvent, Pass, PassEvent, RunConfig, RunResult};
use crate::{reference, storage};
use anyhow::Result;
use std::sync::mpsc::Sender;

/// Runs the substitution passes over one loaded document, in a fixed order.
///
/// Ordering is mandatory: Placeholder Replacement → Footer Reference → Date
/// Stamp → Contractual Year (only when a year was supplied) → Save. The
/// footer pass matches the original, unmodified reference marker, which the
/// placeholder pass could alter if the marker shared text with the
/// placeholder, so the passes are not safe to reorder.
pub struct UpdateEngine {
    cfg: RunConfig,
}

impl UpdateEngine {
    pub fn new(cfg: RunConfig) -> Self {
        Self { cfg }
    }

    pub fn run(self, event_tx: &Sender<PassEvent>) -> Result<RunResult> {
        let mut doc = TemplateDocument::load(&self.cfg.template_path)?;

        let today = reference::today();
        let new_reference = reference::compose_reference(
            &self.cfg.company,
            &self.cfg.products,
            &self.cfg.reference_number,
            today,
        )?;
        let _ = event_tx.send(PassEvent::Info(InfoEvent::ReferenceComposed {
            reference: new_reference.clone(),
        }));

        let _ = event_tx.send(PassEvent::PassStarted {
            pass: Pass::Placeholder,
        });
        let placeholder_replacements = placeholder::replace_placeholder(
            doc.docx_mut(),
            &self.cfg.placeholder,
            &self.cfg.replacement,
            event_tx,
        );

        let _ = event_tx.send(PassEvent::PassStarted {
            pass: Pass::FooterReference,
        });
        let footer_updated = footer::update_footer_reference(
            doc.docx_mut(),
            &self.cfg.reference_marker,
            &new_reference,
            event_tx,
        );

        let _ = event_tx.send(PassEvent::PassStarted {
            pass: Pass::DateStamp,
        });
        let stamp = reference::date_stamp(today)?;
        let date_stamped = datestamp::stamp_submission_date(doc.docx_mut(), &stamp, event_tx);

        let contractual_year_updated = match self.cfg.contractual_year.as_deref() {
            Some(year) => {
                let _ = event_tx.send(PassEvent::PassStarted {
                    pass: Pass::ContractualYear,
                });
                Some(year::update_contractual_year(doc.docx_mut(), year, event_tx))
            }
            None => None,
        };

        let _ = event_tx.send(PassEvent::PassStarted { pass: Pass::Save });
        let output_path = storage::save_document(doc, &new_reference, &self.cfg.output_dir)?;
        let _ = event_tx.send(PassEvent::Info(InfoEvent::Saved {
            path: output_path.clone(),
        }));

        let result = RunResult {
            timestamp_utc: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "now".into()),
            template: self.cfg.template_path.clone(),
            reference: new_reference,
            placeholder_replacements,
            footer_updated,
            date_stamped,
            contractual_year_updated,
            output_path,
        };
        let _ = event_tx.send(PassEvent::RunCompleted {
            result: Box::new(result.clone()),
        });
        Ok(result)
    }
}
