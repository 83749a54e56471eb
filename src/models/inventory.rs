use chrono::NaiveDate;
use serde::Serialize;

/// Valued stock count taken on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryCount {
    pub date: NaiveDate,
    pub value: f64,
}

/// Latest count strictly before `date` (the opening stock of a period).
pub fn opening_value(counts: &[InventoryCount], date: NaiveDate) -> f64 {
    counts
        .iter()
        .filter(|c| c.date < date)
        .max_by_key(|c| c.date)
        .map(|c| c.value)
        .unwrap_or(0.0)
}

/// Latest count on or before `date` (the closing stock of a period).
pub fn closing_value(counts: &[InventoryCount], date: NaiveDate) -> f64 {
    counts
        .iter()
        .filter(|c| c.date <= date)
        .max_by_key(|c| c.date)
        .map(|c| c.value)
        .unwrap_or(0.0)
}
