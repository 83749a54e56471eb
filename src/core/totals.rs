//! Month-by-month totals shared by the registers and the reports.

use crate::models::period::Period;
use crate::utils::round2;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    pub period: Period,
    /// `(month, total)` for every month of the period, empty months included.
    pub rows: Vec<(u32, f64)>,
    pub total: f64,
}

impl MonthlyTotals {
    pub fn month(&self, month: u32) -> f64 {
        self.rows
            .iter()
            .find(|(m, _)| *m == month)
            .map_or(0.0, |(_, v)| *v)
    }
}

/// Sum `amount` per month of `period` over the items whose date falls in it.
pub fn monthly_totals<T, D, A>(items: &[T], period: Period, date: D, amount: A) -> MonthlyTotals
where
    D: Fn(&T) -> NaiveDate,
    A: Fn(&T) -> f64,
{
    let rows: Vec<(u32, f64)> = period
        .months()
        .into_iter()
        .map(|m| {
            let sum: f64 = items
                .iter()
                .filter(|it| {
                    let d = date(it);
                    d.year() == period.year && d.month() == m
                })
                .map(&amount)
                .sum();
            (m, round2(sum))
        })
        .collect();

    let total = round2(rows.iter().map(|(_, v)| v).sum());

    MonthlyTotals {
        period,
        rows,
        total,
    }
}
