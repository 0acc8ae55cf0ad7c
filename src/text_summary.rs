//! Text summary builder for CLI output.
//!
//! Formats the run result as human-readable lines for the default text mode.

use crate::model::RunResult;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Build a text summary from a completed run.
pub(crate) fn build_text_summary(result: &RunResult) -> TextSummary {
    let mut lines = Vec::new();
    lines.push(format!("Template:  {}", result.template.display()));
    lines.push(format!("Reference: {}", result.reference));
    lines.push(format!(
        "Placeholder replacements: {}",
        result.placeholder_replacements
    ));
    lines.push(format!(
        "Footer reference updated: {}",
        yes_no(result.footer_updated)
    ));
    lines.push(format!(
        "Submission date stamped:  {}",
        yes_no(result.date_stamped)
    ));
    match result.contractual_year_updated {
        Some(updated) => lines.push(format!("Contractual year updated: {}", yes_no(updated))),
        None => lines.push("Contractual year updated: skipped".to_string()),
    }
    lines.push(format!("Saved: {}", result.output_path.display()));
    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn result() -> RunResult {
        RunResult {
            timestamp_utc: "2025-01-05T00:00:00Z".to_string(),
            template: PathBuf::from("/tmp/template.docx"),
            reference: "Ref.: Acme_MDM_1_050125".to_string(),
            placeholder_replacements: 3,
            footer_updated: true,
            date_stamped: false,
            contractual_year_updated: None,
            output_path: PathBuf::from("/tmp/out/Acme_MDM_1_050125.docx"),
        }
    }

    #[test]
    fn summary_reports_skipped_year_pass() {
        let summary = build_text_summary(&result());
        assert!(summary
            .lines
            .iter()
            .any(|l| l == "Contractual year updated: skipped"));
        assert!(summary.lines.iter().any(|l| l.starts_with("Saved: ")));
    }

    #[test]
    fn summary_renders_pass_outcomes() {
        let mut r = result();
        r.contractual_year_updated = Some(true);
        let summary = build_text_summary(&r);
        assert!(summary
            .lines
            .iter()
            .any(|l| l == "Footer reference updated: yes"));
        assert!(summary
            .lines
            .iter()
            .any(|l| l == "Submission date stamped:  no"));
        assert!(summary
            .lines
            .iter()
            .any(|l| l == "Contractual year updated: yes"));
    }
}
