//! Display formatting for backend timestamps.

#[cfg(test)]
#[path = "date_test.rs"]
mod date_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts.date());
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

/// Render a backend date as `Mar 5, 2024`. Input that does not parse is
/// returned unchanged so the user still sees something.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_owned();
    };
    date.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| raw.to_owned())
}

/// `YYYY-MM-DD` form used in query strings and form defaults.
#[must_use]
pub fn iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Today's date in UTC.
#[must_use]
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Midnight UTC at the start of `date`, RFC 3339.
#[must_use]
pub fn start_of_day(date: Date) -> String {
    format!("{}T00:00:00Z", iso_date(date))
}

/// Last second of `date` in UTC, RFC 3339.
#[must_use]
pub fn end_of_day(date: Date) -> String {
    format!("{}T23:59:59Z", iso_date(date))
}
