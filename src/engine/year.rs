use crate::docx;
use crate::model::{InfoEvent, Location, Pass, PassEvent};
use docx_rs::{Docx, DocumentChild, ParagraphChild, Run};
use regex::Regex;
use std::sync::mpsc::Sender;
use std::sync::OnceLock;

/// Label phrase identifying the terms-and-conditions paragraph.
const CONTRACTUAL_LABEL: &str = "Minimum Commitment Contractual Period";

/// Half-point font size of the rebuilt runs (9 pt).
const YEAR_SIZE: usize = 18;

/// Span delimited by typographic double quotes.
fn quoted_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("“[^”]+”").expect("valid quoted-span regex"))
}

/// Rewrite the quoted period in the first paragraph containing the
/// contractual label as `“{year} YEAR”`, rebuilding the paragraph as three
/// runs with only the quoted segment bold.
///
/// Process-first-match-only is deliberate policy: scanning stops at the first
/// labelled paragraph even when it carries no quoted span (in which case the
/// paragraph is left unchanged and the miss is reported).
pub(crate) fn update_contractual_year(
    docx: &mut Docx,
    year: &str,
    event_tx: &Sender<PassEvent>,
) -> bool {
    for child in docx.document.children.iter_mut() {
        let DocumentChild::Paragraph(paragraph) = child else {
            continue;
        };
        let text = docx::paragraph_text(paragraph);
        if !text.contains(CONTRACTUAL_LABEL) {
            continue;
        }

        let Some(span) = quoted_span_re().find(&text) else {
            let _ = event_tx.send(PassEvent::Info(InfoEvent::QuotedSpanNotFound));
            return false;
        };

        let before = &text[..span.start()];
        let inside = format!("“{year} YEAR”");
        let after = &text[span.end()..];

        paragraph.children = vec![
            ParagraphChild::Run(Box::new(Run::new().add_text(before).size(YEAR_SIZE))),
            ParagraphChild::Run(Box::new(
                Run::new().add_text(inside.as_str()).size(YEAR_SIZE).bold(),
            )),
            ParagraphChild::Run(Box::new(Run::new().add_text(after).size(YEAR_SIZE))),
        ];

        let _ = event_tx.send(PassEvent::Replaced {
            pass: Pass::ContractualYear,
            location: Location::ParagraphRun,
            text: docx::paragraph_text(paragraph),
        });
        return true;
    }

    let _ = event_tx.send(PassEvent::Info(InfoEvent::ContractualParagraphNotFound));
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::Paragraph;
    use std::sync::mpsc;

    fn paragraph_at(docx: &Docx, idx: usize) -> &Paragraph {
        docx.document
            .children
            .iter()
            .filter_map(|c| match c {
                DocumentChild::Paragraph(p) => Some(p.as_ref()),
                _ => None,
            })
            .nth(idx)
            .expect("paragraph index")
    }

    fn runs(paragraph: &Paragraph) -> Vec<&Run> {
        paragraph
            .children
            .iter()
            .filter_map(|c| match c {
                ParagraphChild::Run(r) => Some(r.as_ref()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn rewrites_quoted_span_with_only_that_segment_bold() {
        let mut docx = Docx::new().add_paragraph(Paragraph::new().add_run(
            Run::new().add_text("Minimum Commitment Contractual Period of “12 YEAR” applies."),
        ));
        let (tx, _rx) = mpsc::channel();

        assert!(update_contractual_year(&mut docx, "24", &tx));

        let paragraph = paragraph_at(&docx, 0);
        assert_eq!(
            docx::paragraph_text(paragraph),
            "Minimum Commitment Contractual Period of “24 YEAR” applies."
        );

        let runs = runs(paragraph);
        assert_eq!(runs.len(), 3);
        assert_eq!(docx::run_text(runs[0]), "Minimum Commitment Contractual Period of ");
        assert_eq!(docx::run_text(runs[1]), "“24 YEAR”");
        assert_eq!(docx::run_text(runs[2]), " applies.");
        assert!(runs[0].run_property.bold.is_none());
        assert!(runs[1].run_property.bold.is_some());
        assert!(runs[2].run_property.bold.is_none());
    }

    #[test]
    fn only_first_labelled_paragraph_is_rewritten() {
        let mut docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(
                Run::new().add_text("Minimum Commitment Contractual Period “1 YEAR”"),
            ))
            .add_paragraph(Paragraph::new().add_run(
                Run::new().add_text("Minimum Commitment Contractual Period “2 YEAR”"),
            ));
        let (tx, _rx) = mpsc::channel();

        assert!(update_contractual_year(&mut docx, "24", &tx));
        assert_eq!(
            docx::paragraph_text(paragraph_at(&docx, 1)),
            "Minimum Commitment Contractual Period “2 YEAR”"
        );
    }

    #[test]
    fn labelled_paragraph_without_quotes_stops_the_scan_unchanged() {
        let mut docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(
                Run::new().add_text("Minimum Commitment Contractual Period of 12 years"),
            ))
            .add_paragraph(Paragraph::new().add_run(
                Run::new().add_text("Minimum Commitment Contractual Period “2 YEAR”"),
            ));
        let (tx, rx) = mpsc::channel();

        assert!(!update_contractual_year(&mut docx, "24", &tx));
        assert_eq!(
            docx::paragraph_text(paragraph_at(&docx, 0)),
            "Minimum Commitment Contractual Period of 12 years"
        );
        // The later labelled paragraph is never reached.
        assert_eq!(
            docx::paragraph_text(paragraph_at(&docx, 1)),
            "Minimum Commitment Contractual Period “2 YEAR”"
        );
        drop(tx);
        assert!(rx
            .try_iter()
            .any(|ev| matches!(ev, PassEvent::Info(InfoEvent::QuotedSpanNotFound))));
    }

    #[test]
    fn missing_label_is_a_reported_no_op() {
        let mut docx =
            Docx::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("plain")));
        let (tx, rx) = mpsc::channel();

        assert!(!update_contractual_year(&mut docx, "24", &tx));
        drop(tx);
        assert!(rx
            .try_iter()
            .any(|ev| matches!(ev, PassEvent::Info(InfoEvent::ContractualParagraphNotFound))));
    }
}
