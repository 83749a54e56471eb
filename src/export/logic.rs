use crate::db::expenses::load_expenses;
use crate::db::payroll::load_positions;
use crate::db::pool::DbPool;
use crate::db::purchases::load_purchases;
use crate::db::sales::load_ledger;
use crate::db::waste::load_waste;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::PositionExport;
use crate::export::range::parse_range;
use crate::export::{ExportFormat, ExportTable};
use crate::models::daily_record::DailyRecordRow;
use crate::ui::messages::warning;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

pub struct ExportLogic;

impl ExportLogic {
    /// Export one register.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a `--range` expression
    pub fn export(
        pool: &DbPool,
        table: ExportTable,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        debug!(table = table.as_str(), format = format.as_str(), ?bounds, "export");

        match table {
            ExportTable::Sales => {
                let ledger = load_ledger(&pool.conn, bounds)?;
                let rows: Vec<DailyRecordRow> = ledger.iter().map(DailyRecordRow::from).collect();
                write_rows(&rows, format, path, force)
            }
            ExportTable::Purchases => {
                let rows = load_purchases(&pool.conn, bounds)?;
                write_rows(&rows, format, path, force)
            }
            ExportTable::Expenses => {
                let rows = load_expenses(&pool.conn, bounds)?;
                write_rows(&rows, format, path, force)
            }
            ExportTable::Waste => {
                let rows = load_waste(&pool.conn, bounds)?;
                write_rows(&rows, format, path, force)
            }
            ExportTable::Payroll => {
                // positions are planned per year
                let rows: Vec<PositionExport> = load_positions(&pool.conn, None)?
                    .iter()
                    .filter(|p| {
                        bounds.is_none_or(|(s, e)| p.year >= s.year() && p.year <= e.year())
                    })
                    .map(PositionExport::from)
                    .collect();
                write_rows(&rows, format, path, force)
            }
        }
    }
}

fn write_rows<T: Serialize>(
    rows: &[T],
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    if rows.is_empty() {
        warning("No rows found for the selected range.");
        return Ok(());
    }

    ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}
