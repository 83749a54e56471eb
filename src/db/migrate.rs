use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};
use tracing::{debug, info};

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![chrono::Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

const CREATE_SALES_DAYS: &str = r#"
    CREATE TABLE IF NOT EXISTS sales_days (
        date              TEXT PRIMARY KEY,
        sales_morning     REAL NOT NULL DEFAULT 0,
        sales_afternoon   REAL NOT NULL DEFAULT 0,
        sales_night       REAL NOT NULL DEFAULT 0,
        diners_morning    INTEGER NOT NULL DEFAULT 0,
        diners_afternoon  INTEGER NOT NULL DEFAULT 0,
        diners_night      INTEGER NOT NULL DEFAULT 0,
        tickets_morning   INTEGER NOT NULL DEFAULT 0,
        tickets_afternoon INTEGER NOT NULL DEFAULT 0,
        tickets_night     INTEGER NOT NULL DEFAULT 0,
        notes             TEXT NOT NULL DEFAULT '',
        updated_at        TEXT NOT NULL
    );
"#;

const CREATE_PURCHASES: &str = r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        id    INTEGER PRIMARY KEY AUTOINCREMENT,
        name  TEXT NOT NULL UNIQUE COLLATE NOCASE
    );

    CREATE TABLE IF NOT EXISTS purchases (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        date        TEXT NOT NULL,
        supplier    TEXT NOT NULL,
        family      TEXT NOT NULL CHECK(family IN ('raw-material','beverages','cleaning','other')),
        cost        REAL NOT NULL CHECK(cost > 0),
        created_at  TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_purchases_date ON purchases(date);
"#;

const CREATE_EXPENSES: &str = r#"
    CREATE TABLE IF NOT EXISTS expenses (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        date        TEXT NOT NULL,
        concept     TEXT NOT NULL,
        category    TEXT NOT NULL,
        cost        REAL NOT NULL CHECK(cost > 0),
        created_at  TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
"#;

const CREATE_POSITIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS positions (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        year          INTEGER NOT NULL,
        name          TEXT NOT NULL,
        gross_annual  REAL NOT NULL DEFAULT 0,
        headcount     TEXT NOT NULL DEFAULT '0,0,0,0,0,0,0,0,0,0,0,0',
        created_at    TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_positions_year ON positions(year);
"#;

const CREATE_WASTE_AND_INVENTORY: &str = r#"
    CREATE TABLE IF NOT EXISTS waste (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        date        TEXT NOT NULL,
        family      TEXT NOT NULL,
        product     TEXT NOT NULL,
        unit        TEXT NOT NULL CHECK(unit IN ('kg','units','l')),
        quantity    REAL NOT NULL CHECK(quantity > 0),
        reason      TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_waste_date ON waste(date);

    CREATE TABLE IF NOT EXISTS inventory_counts (
        date   TEXT PRIMARY KEY,
        value  REAL NOT NULL CHECK(value >= 0)
    );
"#;

/// Expenses recorded before cost kinds existed are structural costs.
fn migrate_add_expense_kind(conn: &Connection) -> Result<()> {
    if table_has_column(conn, "expenses", "kind")? {
        return Ok(());
    }
    conn.execute_batch(
        "ALTER TABLE expenses ADD COLUMN kind TEXT NOT NULL DEFAULT 'fixed'
             CHECK(kind IN ('fixed','variable'));",
    )
}

enum Step {
    Sql(&'static str),
    Func(fn(&Connection) -> Result<()>),
}

/// Ordered list of schema migrations: (version, description, step).
const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20250601_0001_create_sales_days",
        "Created sales_days table",
        Step::Sql(CREATE_SALES_DAYS),
    ),
    (
        "20250601_0002_create_purchases",
        "Created suppliers and purchases tables",
        Step::Sql(CREATE_PURCHASES),
    ),
    (
        "20250601_0003_create_expenses",
        "Created expenses table",
        Step::Sql(CREATE_EXPENSES),
    ),
    (
        "20250601_0004_create_positions",
        "Created payroll positions table",
        Step::Sql(CREATE_POSITIONS),
    ),
    (
        "20250601_0005_create_waste_inventory",
        "Created waste and inventory_counts tables",
        Step::Sql(CREATE_WASTE_AND_INVENTORY),
    ),
    (
        "20250915_0006_add_expense_kind",
        "Added fixed/variable kind to expenses",
        Step::Func(migrate_add_expense_kind),
    ),
];

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db(). Each migration runs in its own transaction and
/// is recorded in the `log` table.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let mut applied = 0;

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        debug!(version, "applying migration");

        let tx = conn.unchecked_transaction()?;
        let res = match step {
            Step::Sql(sql) => tx.execute_batch(sql),
            Step::Func(f) => f(&tx),
        };
        res.map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        mark_applied(&tx, version, message)?;
        tx.commit()?;

        info!(version, "migration applied");
        applied += 1;
    }

    if applied > 0 {
        success(format!("Database schema updated ({applied} migrations applied)."));
    }

    Ok(())
}

/// Number of recorded migrations versus the number known to this binary.
pub fn migration_status(conn: &Connection) -> AppResult<(usize, usize)> {
    ensure_log_table(conn)?;
    let mut done = 0;
    for (version, _, _) in MIGRATIONS {
        if is_applied(conn, version)? {
            done += 1;
        }
    }
    Ok((done, MIGRATIONS.len()))
}
