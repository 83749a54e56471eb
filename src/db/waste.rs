use crate::db::{bad_code, date_from_sql, date_to_sql};
use crate::errors::AppResult;
use crate::models::purchase::Family;
use crate::models::waste::{Unit, WasteEntry, WasteReason};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, params};

fn map_waste(row: &Row) -> rusqlite::Result<WasteEntry> {
    let date_str: String = row.get(1)?;
    let family: String = row.get(2)?;
    let unit: String = row.get(4)?;
    let reason: String = row.get(6)?;

    Ok(WasteEntry {
        id: row.get(0)?,
        date: date_from_sql(1, &date_str)?,
        family: Family::from_db_str(&family).ok_or_else(|| bad_code(2, "family", &family))?,
        product: row.get(3)?,
        unit: Unit::from_db_str(&unit).ok_or_else(|| bad_code(4, "unit", &unit))?,
        quantity: row.get(5)?,
        reason: WasteReason::from_db_str(&reason)
            .ok_or_else(|| bad_code(6, "reason", &reason))?,
    })
}

pub fn insert_waste(conn: &Connection, w: &WasteEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO waste (date, family, product, unit, quantity, reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            date_to_sql(&w.date),
            w.family.to_db_str(),
            w.product,
            w.unit.to_db_str(),
            w.quantity,
            w.reason.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_waste(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<WasteEntry>> {
    let (start, end) = match bounds {
        Some((s, e)) => (date_to_sql(&s), date_to_sql(&e)),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT id, date, family, product, unit, quantity, reason FROM waste
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, id ASC",
    )?;

    let mut out = Vec::new();
    for r in stmt.query_map(params![start, end], map_waste)? {
        out.push(r?);
    }
    Ok(out)
}
