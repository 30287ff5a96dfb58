//! Row-to-entity parsing helpers.
//!
//! `libsql::Row` is column-indexed and loosely typed. These helpers convert
//! TEXT/INTEGER columns into the typed fields of qw-core entities and turn
//! bad stored data into [`StoreError::InvalidState`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with the qw-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `StoreError::InvalidState` if the string does not match any variant.
pub fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| StoreError::InvalidState(format!("Unknown enum value '{s}': {e}")))
}

/// Parse a JSON-encoded TEXT column.
///
/// # Errors
///
/// Returns `StoreError::InvalidState` if the column holds invalid JSON or the
/// wrong shape (e.g., three options instead of four).
pub fn parse_json<T: DeserializeOwned>(s: &str, column: &str) -> Result<T, StoreError> {
    serde_json::from_str(s)
        .map_err(|e| StoreError::InvalidState(format!("Invalid JSON in column {column}: {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column stored as 0/1.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, StoreError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Read a non-negative INTEGER column into a narrower unsigned type.
///
/// # Errors
///
/// Returns `StoreError::InvalidState` if the value is negative or too large.
pub fn get_unsigned<T: TryFrom<i64>>(
    row: &libsql::Row,
    idx: i32,
    column: &str,
) -> Result<T, StoreError> {
    let raw = row.get::<i64>(idx)?;
    T::try_from(raw)
        .map_err(|_| StoreError::InvalidState(format!("Column {column} out of range: {raw}")))
}

/// Saturating conversion for counters written back to INTEGER columns.
#[must_use]
pub fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
