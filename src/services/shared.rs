//! Row-mapping helpers shared by the SQLite-backed services.

use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{self, Result};

/// Parse an RFC 3339 column value into a local datetime.
pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Parse a "YYYY-MM-DD" column value into a date.
pub(crate) fn to_naive_date(value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
