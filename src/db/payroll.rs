use crate::errors::{AppError, AppResult};
use crate::models::position::{Position, parse_headcount};
use chrono::Local;
use rusqlite::{Connection, Row, params};

fn map_position(row: &Row) -> rusqlite::Result<Position> {
    let raw: String = row.get(4)?;
    let headcount = parse_headcount(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("invalid headcount: {raw}"))),
        )
    })?;

    Ok(Position {
        id: row.get(0)?,
        year: row.get(1)?,
        name: row.get(2)?,
        gross_annual: row.get(3)?,
        headcount,
    })
}

pub fn insert_position(conn: &Connection, p: &Position) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO positions (year, name, gross_annual, headcount, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            p.year,
            p.name,
            p.gross_annual,
            p.headcount_csv(),
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_position(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM positions WHERE id = ?1", [id])? > 0)
}

/// Positions for a year, or all years when `year` is None.
pub fn load_positions(conn: &Connection, year: Option<i32>) -> AppResult<Vec<Position>> {
    let mut out = Vec::new();

    match year {
        Some(y) => {
            let mut stmt = conn.prepare(
                "SELECT id, year, name, gross_annual, headcount FROM positions
                 WHERE year = ?1 ORDER BY id ASC",
            )?;
            for r in stmt.query_map([y], map_position)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, year, name, gross_annual, headcount FROM positions
                 ORDER BY year ASC, id ASC",
            )?;
            for r in stmt.query_map([], map_position)? {
                out.push(r?);
            }
        }
    }

    Ok(out)
}
