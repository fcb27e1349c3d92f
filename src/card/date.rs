//! Date handling for the card's date line.

use crate::error::{Error, Result};
use chrono::{Datelike, Local, NaiveDate};

/// Format accepted by the date field.
const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date the way the date field expects it (`YYYY-MM-DD`).
pub fn format_input_date(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// Format a date for the card (`YYYY年MM月DD日`).
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{}年{:02}月{:02}日", date.year(), date.month(), date.day())
}

/// Parse the date field.
///
/// Returns `Ok(None)` for an empty field and `Error::InvalidDate` for
/// anything that is not a real calendar date.
pub fn parse_input_date(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, INPUT_FORMAT)
        .map(Some)
        .map_err(|_| Error::InvalidDate {
            input: input.to_string(),
        })
}

/// Resolve the text of the card's date line.
///
/// An empty selection falls back to `today`.
pub fn resolve_display_date(selected: &str, today: NaiveDate) -> Result<String> {
    let date = parse_input_date(selected)?.unwrap_or(today);
    Ok(format_display_date(date))
}
