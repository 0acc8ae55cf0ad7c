//! Generated-reference composition and the date/filename strings derived
//! from it.
//!
//! The reference string (`Ref.: {company}_{products}_{number}_{ddmmyy}`) is
//! computed once per run and reused by both the footer pass and the save
//! pass, so all of its formatting lives here.

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::OnceLock;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Literal prefix carried by the generated reference and stripped again when
/// deriving the output filename.
pub const REFERENCE_PREFIX: &str = "Ref.: ";

/// `ddmmyy`, e.g. `050125` for Jan 05 2025.
const REFERENCE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day][month][year repr:last_two]");

/// `Mon DD YYYY`, e.g. `Jan 05 2025`.
const DATE_STAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day] [year]");

/// Today's date in the local timezone, falling back to UTC when the local
/// offset cannot be determined.
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Compose the generated reference used in the footer and as the filename
/// basis. Product names are joined with `&`.
pub fn compose_reference(
    company: &str,
    products: &[String],
    reference_number: &str,
    date: Date,
) -> Result<String> {
    let date_part = date
        .format(REFERENCE_DATE_FORMAT)
        .context("failed to format reference date")?;
    Ok(format!(
        "{REFERENCE_PREFIX}{company}_{}_{reference_number}_{date_part}",
        products.join("&")
    ))
}

/// Format the date written into the submission-date cell.
pub fn date_stamp(date: Date) -> Result<String> {
    date.format(DATE_STAMP_FORMAT)
        .context("failed to format date stamp")
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"))
}

fn underscore_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_+").expect("valid underscore regex"))
}

/// Derive a filesystem-safe file stem from the generated reference: strip the
/// `Ref.: ` prefix, drop all whitespace, turn remaining punctuation into
/// underscores, collapse runs of underscores and trim them from both ends.
pub fn sanitize_file_stem(reference: &str) -> String {
    let stem = reference.strip_prefix(REFERENCE_PREFIX).unwrap_or(reference);
    let stem = whitespace_re().replace_all(stem, "");
    let stem = non_word_re().replace_all(&stem, "_");
    let stem = underscore_run_re().replace_all(&stem, "_");
    stem.trim_matches('_').to_string()
}
