//! Long-form localized dates for rendered documents.

use std::sync::LazyLock;

use chrono::{Locale, NaiveDate};
use regex::Regex;

use crate::types::{DraftError, Result};

/// ISO calendar date as entered in form fields
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));

/// Day without padding, full month name, 4-digit year
const LONG_DATE_FORMAT: &str = "%-d %B %Y";

pub const DEFAULT_LOCALE: Locale = Locale::fr_FR;

/// Parse a locale name such as `fr_FR` or `en_US`
pub fn parse_locale(name: &str) -> Result<Locale> {
    name.parse::<Locale>()
        .map_err(|_| DraftError::Config(format!("Unknown locale: {}", name)))
}

/// Parse a strict `YYYY-MM-DD` value into a calendar date
///
/// Returns `None` when the shape does not match or the date does not exist.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Format a date the long way in the given locale (`15 janvier 2025`)
pub fn format_long(date: NaiveDate, locale: Locale) -> String {
    date.format_localized(LONG_DATE_FORMAT, locale).to_string()
}

/// Long-form rendering of `value` if it is an ISO date, `None` otherwise
pub fn localize(value: &str, locale: Locale) -> Option<String> {
    parse_iso_date(value).map(|date| format_long(date, locale))
}
