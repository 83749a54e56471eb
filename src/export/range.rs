//! `--range` expressions: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of the
//! same granularity joined by `:`.

use crate::errors::{AppError, AppResult};
use crate::utils::date::{month_bounds, parse_date};
use chrono::NaiveDate;

/// First and last day covered by a single range term.
fn term_bounds(term: &str) -> Option<(NaiveDate, NaiveDate)> {
    match term.len() {
        4 => {
            let y: i32 = term.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let (y, m) = term.split_once('-')?;
            month_bounds(y.parse().ok()?, m.parse().ok()?)
        }
        10 => {
            let d = parse_date(term)?;
            Some((d, d))
        }
        _ => None,
    }
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidPeriodFormat(r.to_string());

    match r.split_once(':') {
        None => term_bounds(r.trim()).ok_or_else(bad),
        Some((start_raw, end_raw)) => {
            let (start, end) = (start_raw.trim(), end_raw.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidPeriodFormat(format!(
                    "{r}: start and end must have the same format"
                )));
            }

            let (from, _) = term_bounds(start).ok_or_else(bad)?;
            let (_, to) = term_bounds(end).ok_or_else(bad)?;
            if from > to {
                return Err(AppError::InvalidPeriodFormat(format!(
                    "{r}: start is after end"
                )));
            }
            Ok((from, to))
        }
    }
}
