//! Time related utils.

use chrono::NaiveDateTime;
use chrono::Utc;

use crate::{Error, Result};

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into the request date used by signed headers: `2022-03-01 08:12:34`
///
/// The value carries no timezone suffix, it's always UTC.
pub fn format_request_date(t: DateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse a request date produced by [`format_request_date`].
pub fn parse_request_date(s: &str) -> Result<DateTime> {
    let t = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        Error::request_invalid(format!("invalid request date: {s}")).with_source(e)
    })?;
    Ok(t.and_utc())
}

/// Format time into ISO 8601 with second precision: `2022-03-01T08:12:34Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
