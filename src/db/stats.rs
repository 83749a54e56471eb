use crate::db::migrate::migration_status;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

const TABLES: &[(&str, &str)] = &[
    ("sales_days", "Sales days"),
    ("purchases", "Purchases"),
    ("suppliers", "Suppliers"),
    ("expenses", "Expenses"),
    ("positions", "Payroll positions"),
    ("waste", "Waste entries"),
    ("inventory_counts", "Inventory counts"),
];

/// Row count of a known table; `None` when the table has not been created yet.
pub fn count_rows(pool: &DbPool, table: &str) -> AppResult<Option<i64>> {
    let exists = pool
        .conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if !exists {
        return Ok(None);
    }

    Ok(Some(pool.conn.query_row(
        &format!("SELECT COUNT(*) FROM {table}"),
        [],
        |row| row.get(0),
    )?))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let (done, total) = migration_status(&pool.conn)?;
    println!("{}• Migrations:{} {}/{}", CYAN, RESET, done, total);

    //
    // 2) ROWS PER TABLE
    //
    println!("{}• Rows:{}", CYAN, RESET);
    let mut has_sales = false;
    for (table, label) in TABLES {
        match count_rows(pool, table)? {
            Some(n) => {
                has_sales |= *table == "sales_days";
                println!("    {:<18} {}{}{}", label, GREEN, n, RESET);
            }
            None => println!("    {:<18} {GREY}missing (run db --migrate){RESET}", label),
        }
    }

    if !has_sales {
        println!();
        return Ok(());
    }

    //
    // 3) SALES DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM sales_days", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM sales_days", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Sales range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
