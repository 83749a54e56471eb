//! Date-ordered collection of daily records (one per calendar day).

use super::daily_record::DailyRecord;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<DailyRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from loader output. When a date appears more than
    /// once, the record that comes last wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DailyRecord>,
    {
        let mut ledger = Self::new();
        for r in records {
            ledger.upsert(r);
        }
        ledger
    }

    /// Insert or overwrite the record for its date. Returns the replaced one.
    pub fn upsert(&mut self, record: DailyRecord) -> Option<DailyRecord> {
        match self.records.binary_search_by_key(&record.date, |r| r.date) {
            Ok(idx) => Some(std::mem::replace(&mut self.records[idx], record)),
            Err(idx) => {
                self.records.insert(idx, record);
                None
            }
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with `start <= date <= end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> &[DailyRecord] {
        if start > end {
            return &[];
        }
        let lo = self.records.partition_point(|r| r.date < start);
        let hi = self.records.partition_point(|r| r.date <= end);
        &self.records[lo..hi]
    }

    pub fn in_month(&self, year: i32, month: u32) -> &[DailyRecord] {
        match crate::utils::date::month_bounds(year, month) {
            Some((start, end)) => self.between(start, end),
            None => &[],
        }
    }

    /// Distinct calendar years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.date.year()).collect();
        years.dedup();
        years
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
