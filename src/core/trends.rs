//! Sales direction, weekly consistency and customer behaviour.
//!
//! Everything here walks the ledger in date order and counts *records*,
//! not calendar days: a closed day simply has no record.

use crate::core::comparator::{Variance, variance};
use crate::errors::{AppError, AppResult};
use crate::models::daily_record::{DailyRecord, Shift, ShiftValues, ratio};
use crate::utils::date::{iso_week_bounds, weekday_name};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

pub const MOVING_WINDOW: usize = 7;
pub const CONSISTENCY_WEEKS: usize = 6;

pub const CV_ALERT_PCT: f64 = 20.0;
pub const DAY_SHARE_ALERT_PCT: f64 = 30.0;
pub const TICKETS_PER_DINER_ALERT: f64 = -0.04;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    HighWeeklyVariability,
    SingleDayDependency,
    SharedConsumptionRising,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::HighWeeklyVariability => "High weekly variability",
            Alert::SingleDayDependency => "Strong dependency on a single weekday",
            Alert::SharedConsumptionRising => "Shared consumption rising (fewer tickets per diner)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayShare {
    pub weekday: Weekday,
    pub pct: f64,
}

impl WeekdayShare {
    pub fn name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    /// Moving average at the last record, when enough records exist.
    pub moving_average: Option<f64>,
    /// Moving average against the one ending `MOVING_WINDOW` records earlier.
    pub direction: Variance,
    /// Weekly totals used for the coefficient of variation, oldest first.
    pub weekly_totals: Vec<((i32, u32), f64)>,
    pub weekly_cv: f64,
    pub weekday_shares: Vec<WeekdayShare>,
    pub strong_day: Option<WeekdayShare>,
    pub weak_day: Option<WeekdayShare>,
    pub tickets_per_diner: f64,
    pub tickets_per_diner_delta: f64,
    pub alerts: Vec<Alert>,
}

/// Mean of the `window` values ending at `end` (exclusive).
fn window_mean(values: &[f64], end: usize, window: usize) -> Option<f64> {
    if window == 0 || end < window || end > values.len() {
        return None;
    }
    let slice = &values[end - window..end];
    Some(slice.iter().sum::<f64>() / window as f64)
}

/// Moving average of total sales at the last record, and its variation
/// against the average ending `window` records earlier.
pub fn moving_average_direction(records: &[DailyRecord], window: usize) -> (Option<f64>, Variance) {
    let sales: Vec<f64> = records.iter().map(|r| r.total_sales()).collect();
    let n = sales.len();

    let current = window_mean(&sales, n, window);
    let previous = n.checked_sub(window).and_then(|e| window_mean(&sales, e, window));

    let direction = match (current, previous) {
        (Some(c), Some(p)) => variance(c, p),
        (Some(c), None) => variance(c, c),
        _ => variance(0.0, 0.0),
    };

    (current, direction)
}

/// Sales summed per ISO (year, week), chronological.
pub fn weekly_totals(records: &[DailyRecord]) -> Vec<((i32, u32), f64)> {
    let mut weeks: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in records {
        let w = r.date.iso_week();
        *weeks.entry((w.year(), w.week())).or_insert(0.0) += r.total_sales();
    }
    weeks.into_iter().collect()
}

/// Sample standard deviation over mean, in percent. 0 with fewer than two
/// values or a non-positive mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt() / mean * 100.0
}

/// Share of each weekday (Monday first) in the sales of the ISO week
/// containing `anchor`. All zero when the week sold nothing.
pub fn weekday_shares(records: &[DailyRecord], anchor: NaiveDate) -> Vec<WeekdayShare> {
    let (monday, sunday) = iso_week_bounds(anchor);
    let week: Vec<&DailyRecord> = records
        .iter()
        .filter(|r| r.date >= monday && r.date <= sunday)
        .collect();
    let total: f64 = week.iter().map(|r| r.total_sales()).sum();

    WEEKDAYS
        .iter()
        .map(|wd| {
            let day: f64 = week
                .iter()
                .filter(|r| r.date.weekday() == *wd)
                .map(|r| r.total_sales())
                .sum();
            WeekdayShare {
                weekday: *wd,
                pct: ratio(day, total) * 100.0,
            }
        })
        .collect()
}

/// Tickets per diner at the last record and its change against the record
/// `window` positions earlier.
pub fn tickets_per_diner_trend(records: &[DailyRecord], window: usize) -> (f64, f64) {
    let Some(last) = records.last() else {
        return (0.0, 0.0);
    };
    let current = last.tickets_per_diner();
    let previous = records
        .len()
        .checked_sub(window + 1)
        .map(|i| records[i].tickets_per_diner())
        .unwrap_or(current);
    (current, current - previous)
}

/// Trend radar over every record up to `anchor`.
pub fn trend_report(records: &[DailyRecord], anchor: NaiveDate) -> AppResult<TrendReport> {
    let upto: Vec<DailyRecord> = records
        .iter()
        .filter(|r| r.date <= anchor)
        .cloned()
        .collect();

    if upto.is_empty() {
        return Err(AppError::NoRecordsInPeriod(format!(
            "trends up to {anchor}"
        )));
    }

    let (moving_average, direction) = moving_average_direction(&upto, MOVING_WINDOW);

    let weeks = weekly_totals(&upto);
    let recent: Vec<((i32, u32), f64)> = weeks
        .iter()
        .skip(weeks.len().saturating_sub(CONSISTENCY_WEEKS))
        .copied()
        .collect();
    let values: Vec<f64> = recent.iter().map(|(_, v)| *v).collect();
    let weekly_cv = coefficient_of_variation(&values);

    let shares = weekday_shares(&upto, anchor);
    // ties resolve to the earliest weekday
    let strong_day = shares
        .iter()
        .fold(None::<&WeekdayShare>, |best, s| match best {
            Some(b) if b.pct >= s.pct => Some(b),
            _ => Some(s),
        })
        .cloned();
    let weak_day = shares
        .iter()
        .fold(None::<&WeekdayShare>, |best, s| match best {
            Some(b) if b.pct <= s.pct => Some(b),
            _ => Some(s),
        })
        .cloned();

    let (tpd, tpd_delta) = tickets_per_diner_trend(&upto, MOVING_WINDOW);

    let mut alerts = Vec::new();
    if weekly_cv > CV_ALERT_PCT {
        alerts.push(Alert::HighWeeklyVariability);
    }
    if strong_day.as_ref().is_some_and(|s| s.pct > DAY_SHARE_ALERT_PCT) {
        alerts.push(Alert::SingleDayDependency);
    }
    if tpd_delta < TICKETS_PER_DINER_ALERT {
        alerts.push(Alert::SharedConsumptionRising);
    }

    Ok(TrendReport {
        moving_average,
        direction,
        weekly_totals: recent,
        weekly_cv,
        weekday_shares: shares,
        strong_day,
        weak_day,
        tickets_per_diner: tpd,
        tickets_per_diner_delta: tpd_delta,
        alerts,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftBehaviour {
    pub shift: Shift,
    pub sales_per_diner: f64,
    pub tickets_per_diner: f64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Behaviour {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub sales: f64,
    pub diners: u64,
    pub tickets: u64,
    pub tickets_per_diner: f64,
    pub sales_per_diner: f64,
    pub shifts: Vec<ShiftBehaviour>,
    pub readings: Vec<&'static str>,
}

/// How customers bought during the ISO week containing `anchor`.
pub fn behaviour(records: &[DailyRecord], anchor: NaiveDate) -> AppResult<Behaviour> {
    let (monday, sunday) = iso_week_bounds(anchor);
    let week: Vec<&DailyRecord> = records
        .iter()
        .filter(|r| r.date >= monday && r.date <= sunday)
        .collect();

    let (Some(first), Some(last)) = (
        week.iter().map(|r| r.date).min(),
        week.iter().map(|r| r.date).max(),
    ) else {
        return Err(AppError::NoRecordsInPeriod(format!(
            "ISO week {monday} – {sunday}"
        )));
    };

    let mut sales = ShiftValues::<f64>::default();
    let mut diners = ShiftValues::<u64>::default();
    let mut tickets = ShiftValues::<u64>::default();
    for r in &week {
        sales = ShiftValues::new(
            sales.morning + r.sales.morning,
            sales.afternoon + r.sales.afternoon,
            sales.night + r.sales.night,
        );
        diners = ShiftValues::new(
            diners.morning + u64::from(r.diners.morning),
            diners.afternoon + u64::from(r.diners.afternoon),
            diners.night + u64::from(r.diners.night),
        );
        tickets = ShiftValues::new(
            tickets.morning + u64::from(r.tickets.morning),
            tickets.afternoon + u64::from(r.tickets.afternoon),
            tickets.night + u64::from(r.tickets.night),
        );
    }

    let total_sales = sales.total();
    let total_diners = diners.total();
    let total_tickets = tickets.total();

    let shifts: Vec<ShiftBehaviour> = Shift::ALL
        .iter()
        .map(|s| ShiftBehaviour {
            shift: *s,
            sales_per_diner: ratio(sales.get(*s), diners.get(*s) as f64),
            tickets_per_diner: ratio(tickets.get(*s) as f64, diners.get(*s) as f64),
            share_pct: ratio(sales.get(*s), total_sales) * 100.0,
        })
        .collect();

    let tickets_per_diner = ratio(total_tickets as f64, total_diners as f64);
    let sales_per_diner = ratio(total_sales, total_diners as f64);

    let mut readings = Vec::new();
    let share = |s: Shift| shifts.iter().find(|b| b.shift == s).map_or(0.0, |b| b.share_pct);
    if share(Shift::Afternoon) > share(Shift::Morning) && share(Shift::Afternoon) > share(Shift::Night)
    {
        readings.push("The afternoon drives the week");
    }
    if sales_per_diner > 0.0 {
        readings.push("Average value per customer is steady");
    }
    if tickets_per_diner > 1.3 {
        readings.push("Good conversion per customer");
    }
    if readings.is_empty() {
        readings.push("No clear pattern yet");
    }

    Ok(Behaviour {
        first_day: first,
        last_day: last,
        sales: total_sales,
        diners: total_diners,
        tickets: total_tickets,
        tickets_per_diner,
        sales_per_diner,
        shifts,
        readings,
    })
}
