//! Note timestamp normalization.
//!
//! ENEX writes `20210305T100000Z`, but hand-edited or third-party exports
//! also use RFC 3339 and plain `YYYY-MM-DD HH:MM:SS`. Every accepted form is
//! turned into UTC and rendered as `DD.MM.YYYY HH:MM:SS GMT`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ExtractError;

/// Output format for created/updated meta values.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S GMT";

/// Naive layouts tried after the offset-aware ones. A trailing `Z` is
/// removed before these are attempted.
const NAIVE_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a loosely formatted timestamp into a UTC calendar timestamp.
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.naive_utc());
    }

    let naive = value.strip_suffix('Z').unwrap_or(value);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Normalizes the text of a `created`/`updated` element.
///
/// Blank text leaves the field unset. Text that is present but cannot be
/// parsed is an error.
pub fn normalize(field: &'static str, value: &str) -> Result<Option<String>, ExtractError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let parsed = parse(value).ok_or_else(|| ExtractError::Timestamp {
        field,
        value: value.to_string(),
    })?;
    Ok(Some(parsed.format(DISPLAY_FORMAT).to_string()))
}
