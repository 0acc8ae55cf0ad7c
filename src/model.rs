use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything one processing run needs, collected up front by the CLI layer.
/// Immutable for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
    /// Token searched for by the placeholder pass.
    pub placeholder: String,
    /// Text substituted for the placeholder token.
    pub replacement: String,
    /// Marker identifying the footer cell that carries the old reference.
    pub reference_marker: String,
    pub company: String,
    pub reference_number: String,
    pub products: Vec<String>,
    /// Enables the contractual-year pass when present.
    #[serde(default)]
    pub contractual_year: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pass {
    Placeholder,
    FooterReference,
    DateStamp,
    ContractualYear,
    Save,
}

impl Pass {
    /// Human-readable pass name for progress output.
    pub fn name(self) -> &'static str {
        match self {
            Pass::Placeholder => "Placeholder Replacement",
            Pass::FooterReference => "Footer Reference",
            Pass::DateStamp => "Date Stamp",
            Pass::ContractualYear => "Contractual Year",
            Pass::Save => "Save",
        }
    }
}

/// Where a substitution landed inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    ParagraphRun,
    TableCell,
    FooterCell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PassEvent {
    PassStarted {
        pass: Pass,
    },
    Replaced {
        pass: Pass,
        location: Location,
        text: String,
    },
    Info(InfoEvent),
    RunCompleted {
        // Box to keep PassEvent size small.
        result: Box<RunResult>,
    },
}

/// Structured info events emitted by the engine and consumed by the CLI layer.
/// Soft no-ops (missing markers, labels, quoted spans) land here instead of
/// failing the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InfoEvent {
    ReferenceComposed { reference: String },
    FooterMarkerNotFound { marker: String },
    SubmissionDateRowNotFound,
    ContractualParagraphNotFound,
    QuotedSpanNotFound,
    Saved { path: PathBuf },
}

impl InfoEvent {
    /// Render a human-readable message for the CLI layer.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::ReferenceComposed { reference } => {
                format!("Generated reference: {}", reference)
            }
            InfoEvent::FooterMarkerNotFound { marker } => {
                format!("No footer cell containing '{}' to update", marker)
            }
            InfoEvent::SubmissionDateRowNotFound => {
                "No 'Submission Date' row found to stamp".to_string()
            }
            InfoEvent::ContractualParagraphNotFound => {
                "No 'Minimum Commitment Contractual Period' paragraph found".to_string()
            }
            InfoEvent::QuotedSpanNotFound => {
                "Contractual paragraph found but no quoted span to rewrite".to_string()
            }
            InfoEvent::Saved { path } => format!("Document saved as '{}'", path.display()),
        }
    }
}

/// Outcome of one processing run, printed as text or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(default)]
    pub timestamp_utc: String,
    pub template: PathBuf,
    pub reference: String,
    pub placeholder_replacements: usize,
    pub footer_updated: bool,
    pub date_stamped: bool,
    /// None when no contractual year was supplied and the pass was skipped.
    #[serde(default)]
    pub contractual_year_updated: Option<bool>,
    pub output_path: PathBuf,
}
