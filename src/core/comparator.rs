//! Year-over-year comparable-day resolution.
//!
//! Two matching policies exist and give different answers around year
//! boundaries and after 53-week ISO years, so the caller always names one:
//!
//! - [`ComparePolicy::NearestWeekday`]: same weekday, calendar year of the
//!   anniversary, nearest to the anniversary date.
//! - [`ComparePolicy::IsoWeek`]: same weekday in the same ISO week number of
//!   the previous ISO year.

use crate::errors::{AppError, AppResult};
use crate::models::daily_record::DailyRecord;
use crate::utils::date::{day_label, one_year_before, weekday_name};
use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Label used when no historical day matches.
pub const NO_COMPARABLE: &str = "no comparable history";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ComparePolicy {
    /// Same weekday, nearest to the same calendar day last year
    NearestWeekday,
    /// Same weekday of the same ISO week last ISO year
    IsoWeek,
}

impl ComparePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparePolicy::NearestWeekday => "nearest-weekday",
            ComparePolicy::IsoWeek => "iso-week",
        }
    }
}

impl fmt::Display for ComparePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving "today" against last year.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparablePair {
    /// The anchor day, zero-filled when it has not been recorded.
    pub current: DailyRecord,
    pub reference: Option<DailyRecord>,
    pub policy: ComparePolicy,
    pub label: String,
}

impl ComparablePair {
    /// Reference record, or a zero record dated on the anchor's anniversary.
    pub fn baseline(&self) -> DailyRecord {
        self.reference
            .clone()
            .unwrap_or_else(|| DailyRecord::zero(one_year_before(self.current.date)))
    }
}

/// Record stored for `date`, or a zero record when the day is absent.
pub fn find_today(ledger: &[DailyRecord], date: NaiveDate) -> DailyRecord {
    ledger
        .iter()
        .find(|r| r.date == date)
        .cloned()
        .unwrap_or_else(|| DailyRecord::zero(date))
}

/// Policy A: among the records of the anniversary's calendar year that fall
/// on the anchor's weekday, the one closest to the anniversary.
pub fn nearest_weekday_match(ledger: &[DailyRecord], anchor: NaiveDate) -> Option<&DailyRecord> {
    let target = one_year_before(anchor);
    let weekday = anchor.weekday();

    ledger
        .iter()
        .filter(|r| r.date.year() == target.year() && r.date.weekday() == weekday)
        .min_by_key(|r| (r.date - target).num_days().abs())
}

/// Policy B: the record on the anchor's weekday in the same ISO week of the
/// previous ISO year. Several matches mean the ledger holds duplicate dates.
pub fn iso_week_match(
    ledger: &[DailyRecord],
    anchor: NaiveDate,
) -> AppResult<Option<&DailyRecord>> {
    let iso = anchor.iso_week();
    let year = iso.year() - 1;
    let week = iso.week();
    let weekday = anchor.weekday();

    let matches: Vec<&DailyRecord> = ledger
        .iter()
        .filter(|r| {
            let w = r.date.iso_week();
            w.year() == year && w.week() == week && r.date.weekday() == weekday
        })
        .collect();

    match matches.len() {
        0 | 1 => Ok(matches.first().copied()),
        count => Err(AppError::AmbiguousMatch {
            year,
            week,
            weekday: weekday_name(weekday).to_string(),
            count,
        }),
    }
}

/// Historical record to compare `anchor` with, plus a display label.
pub fn find_comparable(
    ledger: &[DailyRecord],
    anchor: NaiveDate,
    policy: ComparePolicy,
) -> AppResult<(Option<DailyRecord>, String)> {
    let found = match policy {
        ComparePolicy::NearestWeekday => nearest_weekday_match(ledger, anchor),
        ComparePolicy::IsoWeek => iso_week_match(ledger, anchor)?,
    };

    debug!(%anchor, %policy, matched = ?found.map(|r| r.date), "comparable lookup");

    Ok(match found {
        Some(r) => (Some(r.clone()), day_label(r.date)),
        None => (None, NO_COMPARABLE.to_string()),
    })
}

/// `find_today` and `find_comparable` in one step.
pub fn resolve(
    ledger: &[DailyRecord],
    anchor: NaiveDate,
    policy: ComparePolicy,
) -> AppResult<ComparablePair> {
    let current = find_today(ledger, anchor);
    let (reference, label) = find_comparable(ledger, anchor, policy)?;

    Ok(ComparablePair {
        current,
        reference,
        policy,
        label,
    })
}

/// Signed difference and percentage change against a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variance {
    pub delta: f64,
    pub pct: f64,
}

impl Variance {
    pub fn signal(&self) -> Signal {
        classify(self.pct)
    }
}

/// `pct` is 0 whenever the baseline is not positive, whatever `current` is.
pub fn variance(current: f64, baseline: f64) -> Variance {
    let delta = current - baseline;
    let pct = if baseline > 0.0 {
        delta / baseline * 100.0
    } else {
        0.0
    };
    Variance { delta, pct }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    StrongUp,
    Up,
    Flat,
    Down,
    StrongDown,
}

impl Signal {
    pub fn icon(&self) -> &'static str {
        match self {
            Signal::StrongUp => "⇈",
            Signal::Up => "↑",
            Signal::Flat => "·",
            Signal::Down => "↓",
            Signal::StrongDown => "⚠",
        }
    }
}

/// Percentage bands: `>= 30`, `[1, 30)`, `(-1, 1)`, `(-30, -1]`, `<= -30`.
/// NaN is treated as flat.
pub fn classify(pct: f64) -> Signal {
    if pct.is_nan() {
        Signal::Flat
    } else if pct >= 30.0 {
        Signal::StrongUp
    } else if pct >= 1.0 {
        Signal::Up
    } else if pct > -1.0 {
        Signal::Flat
    } else if pct > -30.0 {
        Signal::Down
    } else {
        Signal::StrongDown
    }
}
