use crate::db::{bad_code, date_from_sql, date_to_sql};
use crate::errors::AppResult;
use crate::models::expense::{CostKind, Expense, ExpenseCategory};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Row, params};

fn map_expense(row: &Row) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(1)?;
    let category: String = row.get(3)?;
    let kind: String = row.get(4)?;

    Ok(Expense {
        id: row.get(0)?,
        date: date_from_sql(1, &date_str)?,
        concept: row.get(2)?,
        category: ExpenseCategory::from_db_str(&category)
            .ok_or_else(|| bad_code(3, "category", &category))?,
        kind: CostKind::from_db_str(&kind).ok_or_else(|| bad_code(4, "kind", &kind))?,
        cost: row.get(5)?,
    })
}

pub fn insert_expense(conn: &Connection, e: &Expense) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO expenses (date, concept, category, kind, cost, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            date_to_sql(&e.date),
            e.concept,
            e.category.to_db_str(),
            e.kind.to_db_str(),
            e.cost,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_expense(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM expenses WHERE id = ?1", [id])? > 0)
}

pub fn load_expenses(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Expense>> {
    let (start, end) = match bounds {
        Some((s, e)) => (date_to_sql(&s), date_to_sql(&e)),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT id, date, concept, category, kind, cost FROM expenses
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, id ASC",
    )?;

    let mut out = Vec::new();
    for r in stmt.query_map(params![start, end], map_expense)? {
        out.push(r?);
    }
    Ok(out)
}
