//! Date normalization.
//!
//! Every date-bearing field ends up as a `DateTime<Utc>`. The parsers differ in
//! how much input they tolerate.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Expected-format label for [`parse_offset_datetime`].
pub const OFFSET_DATETIME_FORMAT: &str = "ISO 8601 date-time with offset";

/// Expected-format label for [`parse_calendar_date`].
pub const CALENDAR_DATE_FORMAT: &str = "ISO 8601 date (YYYY-MM-DD)";

/// Expected-format label for [`parse_loose`].
pub const LOOSE_DATE_FORMAT: &str = "date or date-time";

// ASCII digits only; hours, minutes and seconds are range-checked here so
// chrono's leap second `60` is rejected.
static OFFSET_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2})T([01][0-9]|2[0-3]):([0-5][0-9])",
        r"(?::([0-5][0-9])(\.[0-9]+)?)?",
        r"(Z|[+-][0-9]{2}(?::?[0-9]{2})?)$",
    ))
    .expect("offset date-time pattern is valid")
});

static CALENDAR_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("calendar date pattern is valid")
});

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a date written in any common form.
///
/// Accepts RFC 3339, a bare `YYYY-MM-DD` (UTC midnight), a date-time without
/// offset (taken as UTC) and RFC 2822.
pub fn parse_loose(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc());
        }
    }

    DateTime::parse_from_rfc2822(input)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Parse a strict ISO 8601 date-time that carries `Z` or a numeric offset.
///
/// Seconds and fractional seconds are optional; the offset may be written
/// `+HH:MM`, `+HHMM` or `+HH`.
pub fn parse_offset_datetime(input: &str) -> Option<DateTime<Utc>> {
    let caps = OFFSET_DATETIME.captures(input)?;

    let date = &caps[1];
    let hour = &caps[2];
    let minute = &caps[3];
    let seconds = caps.get(4).map_or("00", |m| m.as_str());
    let fraction = caps.get(5).map_or("", |m| m.as_str());
    let offset = normalize_offset(&caps[6])?;

    let canonical = format!("{date}T{hour}:{minute}:{seconds}{fraction}{offset}");
    DateTime::<FixedOffset>::parse_from_rfc3339(&canonical)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Rewrite an offset designator as `Z` or `±HH:MM`.
fn normalize_offset(offset: &str) -> Option<String> {
    if offset == "Z" {
        return Some("Z".to_string());
    }

    let (sign, digits) = offset.split_at(1);
    let digits = digits.replace(':', "");
    match digits.len() {
        2 => Some(format!("{sign}{digits}:00")),
        4 => Some(format!("{sign}{}:{}", &digits[..2], &digits[2..])),
        _ => None,
    }
}

/// Parse a calendar date `YYYY-MM-DD` with no time component.
///
/// The result is midnight UTC of that day.
pub fn parse_calendar_date(input: &str) -> Option<DateTime<Utc>> {
    if !CALENDAR_DATE.is_match(input) {
        return None;
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}
