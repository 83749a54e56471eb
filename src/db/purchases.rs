use crate::db::{bad_code, date_from_sql, date_to_sql};
use crate::errors::AppResult;
use crate::models::purchase::{Family, Purchase};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_purchase(row: &Row) -> rusqlite::Result<Purchase> {
    let date_str: String = row.get(1)?;
    let family_str: String = row.get(3)?;

    Ok(Purchase {
        id: row.get(0)?,
        date: date_from_sql(1, &date_str)?,
        supplier: row.get(2)?,
        family: Family::from_db_str(&family_str)
            .ok_or_else(|| bad_code(3, "family", &family_str))?,
        cost: row.get(4)?,
    })
}

pub fn insert_purchase(conn: &Connection, p: &Purchase) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO purchases (date, supplier, family, cost, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            date_to_sql(&p.date),
            p.supplier,
            p.family.to_db_str(),
            p.cost,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_purchase(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM purchases WHERE id = ?1", [id])? > 0)
}

pub fn load_purchases(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Purchase>> {
    let (start, end) = match bounds {
        Some((s, e)) => (date_to_sql(&s), date_to_sql(&e)),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT id, date, supplier, family, cost FROM purchases
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, id ASC",
    )?;

    let mut out = Vec::new();
    for r in stmt.query_map(params![start, end], map_purchase)? {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Suppliers
// ---------------------------

pub fn insert_supplier(conn: &Connection, name: &str) -> AppResult<()> {
    conn.execute("INSERT INTO suppliers (name) VALUES (?1)", [name])?;
    Ok(())
}

/// Registered spelling of a supplier, matched case-insensitively.
pub fn find_supplier(conn: &Connection, name: &str) -> AppResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT name FROM suppliers WHERE name = ?1 COLLATE NOCASE",
            [name],
            |row| row.get(0),
        )
        .optional()?)
}

/// Supplier names sorted case-insensitively.
pub fn load_suppliers(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM suppliers ORDER BY name COLLATE NOCASE ASC")?;
    let mut out = Vec::new();
    for r in stmt.query_map([], |row| row.get::<_, String>(0))? {
        out.push(r?);
    }
    Ok(out)
}
