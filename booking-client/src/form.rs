//! Form input parsing
//!
//! Raw text as typed into a form becomes the typed values the API expects.
//! Numbers are parsed leniently, the way a browser `parseInt` reads a
//! number input; there are no range checks here.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};

use crate::{ClientError, ClientResult};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Trimmed value, or `None` for blank input
pub fn non_blank(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Required text field
pub fn required<'a>(input: &'a str, message: &str) -> ClientResult<&'a str> {
    non_blank(input).ok_or_else(|| ClientError::Validation(message.to_string()))
}

/// Parse the leading integer of `input`: `"4"`, `" 12 "`, `"6 people"` all work.
pub fn parse_int(input: &str, field: &str) -> ClientResult<i32> {
    let s = input.trim_start();
    let digits_start = usize::from(s.starts_with(['+', '-']));
    let digits_len = s[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return Err(ClientError::Validation(format!(
            "{} must be a whole number",
            field
        )));
    }

    s[..digits_start + digits_len]
        .parse()
        .map_err(|_| ClientError::Validation(format!("{} is out of range", field)))
}

/// Local date-time input (`2024-05-01T19:30`) to an absolute UTC instant.
///
/// `offset` pins the zone; `None` uses the machine's local zone. Times that
/// are skipped by a DST change are rejected, ambiguous ones take the earlier
/// instant.
pub fn local_to_utc(
    input: &str,
    offset: Option<FixedOffset>,
    field: &str,
) -> ClientResult<DateTime<Utc>> {
    let trimmed = input.trim();
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| {
            ClientError::Validation(format!("{}: invalid date/time \"{}\"", field, trimmed))
        })?;

    let resolved = match offset {
        Some(offset) => offset
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    };

    resolved.ok_or_else(|| {
        ClientError::Validation(format!(
            "{}: \"{}\" does not exist in the local time zone",
            field, trimmed
        ))
    })
}
