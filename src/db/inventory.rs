use crate::db::{date_from_sql, date_to_sql};
use crate::errors::AppResult;
use crate::models::inventory::InventoryCount;
use rusqlite::{Connection, params};

pub fn upsert_count(conn: &Connection, c: &InventoryCount) -> AppResult<()> {
    conn.execute(
        "INSERT INTO inventory_counts (date, value) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET value = excluded.value",
        params![date_to_sql(&c.date), c.value],
    )?;
    Ok(())
}

pub fn load_counts(conn: &Connection) -> AppResult<Vec<InventoryCount>> {
    let mut stmt = conn.prepare("SELECT date, value FROM inventory_counts ORDER BY date ASC")?;
    let rows = stmt.query_map([], |row| {
        let d: String = row.get(0)?;
        Ok(InventoryCount {
            date: date_from_sql(0, &d)?,
            value: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
