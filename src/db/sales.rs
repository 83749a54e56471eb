//! Queries on the `sales_days` table (one row per operated day).

use crate::db::{date_from_sql, date_to_sql};
use crate::errors::AppResult;
use crate::models::daily_record::{DailyRecord, ShiftValues};
use crate::models::ledger::Ledger;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "date, sales_morning, sales_afternoon, sales_night,
     diners_morning, diners_afternoon, diners_night,
     tickets_morning, tickets_afternoon, tickets_night, notes";

pub fn map_row(row: &Row) -> rusqlite::Result<DailyRecord> {
    let date_str: String = row.get(0)?;
    let date = date_from_sql(0, &date_str)?;

    Ok(DailyRecord {
        date,
        sales: ShiftValues::new(row.get(1)?, row.get(2)?, row.get(3)?),
        diners: ShiftValues::new(row.get(4)?, row.get(5)?, row.get(6)?),
        tickets: ShiftValues::new(row.get(7)?, row.get(8)?, row.get(9)?),
        notes: row.get(10)?,
    })
}

/// Insert or overwrite the row for `rec.date`. Returns true when a row for
/// that date already existed.
pub fn upsert_day(conn: &Connection, rec: &DailyRecord) -> AppResult<bool> {
    let existed = load_day(conn, rec.date)?.is_some();

    conn.execute(
        "INSERT INTO sales_days (date, sales_morning, sales_afternoon, sales_night,
             diners_morning, diners_afternoon, diners_night,
             tickets_morning, tickets_afternoon, tickets_night, notes, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
         ON CONFLICT(date) DO UPDATE SET
             sales_morning = excluded.sales_morning,
             sales_afternoon = excluded.sales_afternoon,
             sales_night = excluded.sales_night,
             diners_morning = excluded.diners_morning,
             diners_afternoon = excluded.diners_afternoon,
             diners_night = excluded.diners_night,
             tickets_morning = excluded.tickets_morning,
             tickets_afternoon = excluded.tickets_afternoon,
             tickets_night = excluded.tickets_night,
             notes = excluded.notes,
             updated_at = excluded.updated_at",
        params![
            date_to_sql(&rec.date),
            rec.sales.morning,
            rec.sales.afternoon,
            rec.sales.night,
            rec.diners.morning,
            rec.diners.afternoon,
            rec.diners.night,
            rec.tickets.morning,
            rec.tickets.afternoon,
            rec.tickets.night,
            rec.notes,
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(existed)
}

pub fn load_day(conn: &Connection, date: NaiveDate) -> AppResult<Option<DailyRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM sales_days WHERE date = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([date_to_sql(&date)], map_row).optional()?)
}

pub fn delete_day(conn: &Connection, date: NaiveDate) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM sales_days WHERE date = ?1",
        [date_to_sql(&date)],
    )?;
    Ok(n > 0)
}

/// Load the whole table as a ledger, optionally limited to a date range.
pub fn load_ledger(conn: &Connection, bounds: Option<(NaiveDate, NaiveDate)>) -> AppResult<Ledger> {
    let mut out = Vec::new();

    match bounds {
        None => {
            let sql = format!("SELECT {COLUMNS} FROM sales_days ORDER BY date ASC");
            let mut stmt = conn.prepare(&sql)?;
            for r in stmt.query_map([], map_row)? {
                out.push(r?);
            }
        }
        Some((start, end)) => {
            let sql = format!(
                "SELECT {COLUMNS} FROM sales_days WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![date_to_sql(&start), date_to_sql(&end)], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(Ledger::from_records(out))
}
