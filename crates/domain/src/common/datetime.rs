//! DateTime parsing utilities with consistent error handling.

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Parses an RFC3339 timestamp string, returning an error if parsing fails.
///
/// # Examples
///
/// ```
/// use postdeck_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
///
/// # Errors
///
/// Returns [`DomainError::Parse`] if the string is not valid RFC3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::parse(format!("invalid RFC3339 timestamp {s:?}: {e}")))
}

/// Parses an RFC3339 timestamp string, falling back to the provided default.
///
/// Useful when rehydrating persisted snapshots whose timestamp fields may be
/// malformed: the entry should still load with a usable timestamp.
///
/// # Examples
///
/// ```
/// use postdeck_domain::common::parse_datetime_or;
/// use chrono::{Datelike, TimeZone, Utc};
///
/// let default = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(parse_datetime_or("2024-01-15T10:30:00Z", default).year(), 2024);
/// assert_eq!(parse_datetime_or("not-a-date", default).year(), 2020);
/// ```
pub fn parse_datetime_or(s: &str, default: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(default)
}
