pub mod expenses;
pub mod initialize;
pub mod inventory;
pub mod log;
pub mod migrate;
pub mod payroll;
pub mod pool;
pub mod purchases;
pub mod sales;
pub mod stats;
pub mod waste;

use crate::errors::AppError;
use chrono::NaiveDate;

pub(crate) const DATE_FMT: &str = "%Y-%m-%d";

pub(crate) fn date_to_sql(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Parse a stored `YYYY-MM-DD` column, reporting the column index on failure.
pub(crate) fn date_from_sql(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

/// Map an unknown enum code found in a row to a conversion failure.
pub(crate) fn bad_code(idx: usize, what: &str, code: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(AppError::Other(format!("invalid {what}: {code}"))),
    )
}
