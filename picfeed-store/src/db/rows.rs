use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Layout of SQLite's `CURRENT_TIMESTAMP` and `datetime('now')`, always UTC.
const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Read a timestamp column. RFC 3339 is what the schema writes; rows
/// inserted with SQLite's own datetime text are accepted as UTC.
pub(crate) fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    match raw.parse::<DateTime<Utc>>() {
        Ok(parsed) => Ok(parsed),
        Err(rfc_err) => NaiveDateTime::parse_from_str(&raw, SQLITE_DATETIME_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(rfc_err))),
    }
}
