use crate::core::comparator::{ComparablePair, ComparePolicy, Variance, resolve, variance};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::sales::{delete_day, upsert_day};
use crate::errors::{AppError, AppResult};
use crate::models::daily_record::{DailyRecord, Measure, Shift, ratio};
use crate::models::ledger::Ledger;
use crate::models::period::Period;
use chrono::NaiveDate;
use tracing::debug;

/// High-level business logic for the `sales` command.
pub struct SalesLogic;

impl SalesLogic {
    /// Store a day's entry (last write wins). Returns `true` when an
    /// existing day was overwritten.
    pub fn record_day(pool: &mut DbPool, record: &DailyRecord) -> AppResult<bool> {
        record.validate()?;
        let replaced = upsert_day(&pool.conn, record)?;
        let op = if replaced { "edit" } else { "add" };

        write_log(
            &pool.conn,
            op,
            &record.date.to_string(),
            &format!(
                "sales {:.2}, diners {}, tickets {}",
                record.total_sales(),
                record.total_diners(),
                record.total_tickets()
            ),
        )?;

        Ok(replaced)
    }

    pub fn delete_day(pool: &mut DbPool, date: NaiveDate) -> AppResult<()> {
        if !delete_day(&pool.conn, date)? {
            return Err(AppError::NoRecordForDate(date.to_string()));
        }
        write_log(&pool.conn, "del", &date.to_string(), "Sales day deleted")?;
        Ok(())
    }
}

/// One line of the daily dashboard: a shift, or the whole day.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftComparison {
    /// `None` is the day total.
    pub shift: Option<Shift>,
    pub sales: Variance,
    pub diners_delta: i64,
    pub tickets_delta: i64,
    pub average_ticket: Variance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayReport {
    pub pair: ComparablePair,
    pub lines: Vec<ShiftComparison>,
}

fn compare_shift(current: &DailyRecord, base: &DailyRecord, shift: Option<Shift>) -> ShiftComparison {
    let pair = |m: Measure| (current.measure(m), base.measure(m));
    let (c_sales, b_sales) = pair(Measure::Sales(shift));
    let (c_din, b_din) = pair(Measure::Diners(shift));
    let (c_tk, b_tk) = pair(Measure::Tickets(shift));
    let (c_avg, b_avg) = pair(Measure::AverageTicket(shift));

    ShiftComparison {
        shift,
        sales: variance(c_sales, b_sales),
        diners_delta: (c_din - b_din) as i64,
        tickets_delta: (c_tk - b_tk) as i64,
        average_ticket: variance(c_avg, b_avg),
    }
}

/// Today against its comparable day, shift by shift and in total.
pub fn today_report(
    ledger: &Ledger,
    date: NaiveDate,
    policy: ComparePolicy,
) -> AppResult<TodayReport> {
    let pair = resolve(ledger.records(), date, policy)?;
    let base = pair.baseline();

    let lines = Shift::ALL
        .iter()
        .map(|s| Some(*s))
        .chain(std::iter::once(None))
        .map(|s| compare_shift(&pair.current, &base, s))
        .collect();

    debug!(%date, %policy, label = %pair.label, "today report");
    Ok(TodayReport { pair, lines })
}

/// Rows of a month, in date order.
pub fn month_log(ledger: &Ledger, year: i32, month: u32) -> AppResult<&[DailyRecord]> {
    let rows = ledger.in_month(year, month);
    if rows.is_empty() {
        let period = Period::month(year, month)?;
        return Err(AppError::NoRecordsInPeriod(period.to_string()));
    }
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthClose {
    pub period: Period,
    pub sales_total: f64,
    pub days_operated: usize,
    pub diners: u64,
    pub tickets: u64,
    pub average_ticket: f64,
}

/// Monthly sales close. An empty month closes at zero.
pub fn month_close(ledger: &Ledger, year: i32, month: u32) -> AppResult<MonthClose> {
    let period = Period::month(year, month)?;
    let rows = ledger.in_month(year, month);

    let sales_total: f64 = rows.iter().map(|r| r.total_sales()).sum();
    let tickets: u64 = rows.iter().map(|r| r.total_tickets()).sum();
    let diners: u64 = rows.iter().map(|r| r.total_diners()).sum();

    Ok(MonthClose {
        period,
        sales_total,
        days_operated: rows.len(),
        diners,
        tickets,
        average_ticket: ratio(sales_total, tickets as f64),
    })
}
