//! Column conversion helpers shared by the query modules.
//!
//! Dates are stored as `YYYY-MM-DD` text, timestamps as RFC 3339 text and
//! money as decimal text, so every read goes through a parse that reports the
//! offending column on failure.

use std::{fmt::Display, str::FromStr};

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, ErrorCode, Row};
use rust_decimal::Decimal;

pub(crate) fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

/// Parse a text column with the type's `FromStr` implementation.
pub(crate) fn parsed<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>()
        .map_err(|e| conversion_error(index, format!("Invalid value '{raw}': {e}")))
}

pub(crate) fn parsed_opt<T>(row: &Row, index: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = row.get(index)?;
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|e| conversion_error(index, format!("Invalid value '{value}': {e}")))
    })
    .transpose()
}

pub(crate) fn timestamp(row: &Row, index: usize) -> rusqlite::Result<Timestamp> {
    parsed::<Timestamp>(row, index)
}

pub(crate) fn date(row: &Row, index: usize) -> rusqlite::Result<Date> {
    parsed::<Date>(row, index)
}

pub(crate) fn date_opt(row: &Row, index: usize) -> rusqlite::Result<Option<Date>> {
    parsed_opt::<Date>(row, index)
}

pub(crate) fn decimal(row: &Row, index: usize) -> rusqlite::Result<Decimal> {
    parsed::<Decimal>(row, index)
}

pub(crate) fn decimal_opt(row: &Row, index: usize) -> rusqlite::Result<Option<Decimal>> {
    parsed_opt::<Decimal>(row, index)
}

pub(crate) fn id(row: &Row, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}

pub(crate) fn id_opt(row: &Row, index: usize) -> rusqlite::Result<Option<u64>> {
    Ok(row.get::<_, Option<i64>>(index)?.map(|value| value as u64))
}

/// Whether the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(error: &rusqlite::Error) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
