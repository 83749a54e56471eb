pub mod backup;
pub mod config;
pub mod db;
pub mod expense;
pub mod export;
pub mod import;
pub mod init;
pub mod inventory;
pub mod log;
pub mod payroll;
pub mod purchase;
pub mod report;
pub mod sales;
pub mod supplier;
pub mod waste;

use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::utils::date::{parse_date, today};
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` argument.
pub(crate) fn arg_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Optional date argument, today when absent.
pub(crate) fn arg_date_or_today(s: &Option<String>) -> AppResult<NaiveDate> {
    match s {
        Some(d) => arg_date(d),
        None => Ok(today()),
    }
}

/// Optional `YYYY` / `YYYY-MM` argument.
pub(crate) fn arg_period(s: &Option<String>) -> AppResult<Option<Period>> {
    s.as_deref().map(|p| p.parse::<Period>()).transpose()
}

/// `YYYY-MM` argument, current month when absent.
pub(crate) fn arg_month_or_current(s: &Option<String>) -> AppResult<(i32, u32)> {
    let period = match s {
        Some(p) => p.parse::<Period>()?,
        None => Period::of_date(today()),
    };
    match period.month {
        Some(m) => Ok((period.year, m)),
        None => Err(AppError::InvalidPeriodFormat(format!(
            "{}: a month (YYYY-MM) is required",
            period.year
        ))),
    }
}
