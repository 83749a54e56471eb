use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_bounds, month_name};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Reporting period: a whole year or a single month of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidPeriodFormat(format!("month {month}")));
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    /// Build from the `--year` / `--month` pair used by the monthly tables.
    pub fn from_parts(year: i32, month: Option<u32>) -> AppResult<Self> {
        match month {
            Some(m) => Self::month(year, m),
            None => Ok(Self::year(year)),
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Some(date.month()),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        let m = self.month.unwrap_or(1);
        month_bounds(self.year, m).map(|(s, _)| s).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        let m = self.month.unwrap_or(12);
        month_bounds(self.year, m).map(|(_, e)| e).unwrap_or_default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && self.month.is_none_or(|m| date.month() == m)
    }

    /// Months covered by the period, ascending.
    pub fn months(&self) -> Vec<u32> {
        match self.month {
            Some(m) => vec![m],
            None => (1..=12).collect(),
        }
    }
}

impl FromStr for Period {
    type Err = AppError;

    /// Accepts `YYYY` or `YYYY-MM`.
    fn from_str(s: &str) -> AppResult<Self> {
        let s = s.trim();
        let bad = || AppError::InvalidPeriodFormat(s.to_string());

        match s.split_once('-') {
            None => {
                let year: i32 = s.parse().map_err(|_| bad())?;
                Ok(Self::year(year))
            }
            Some((y, m)) => {
                let year: i32 = y.parse().map_err(|_| bad())?;
                let month: u32 = m.parse().map_err(|_| bad())?;
                Self::month(year, month).map_err(|_| bad())
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(m) => write!(f, "{} {}", month_name(m), self.year),
            None => write!(f, "year {}", self.year),
        }
    }
}
