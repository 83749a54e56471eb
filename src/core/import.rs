use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::sales::upsert_day;
use crate::errors::{AppError, AppResult};
use crate::models::daily_record::DailyRecordRow;
use crate::models::ledger::Ledger;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Rows that repeated a date already seen in the same file.
    pub duplicates: usize,
}

/// Parse a sales CSV (current or legacy headers) into a ledger.
///
/// Missing numeric columns default to zero. A date that cannot be read, or a
/// negative amount, aborts the import with the offending line number.
pub fn read_sales_csv<R: Read>(reader: R) -> AppResult<(Ledger, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<DailyRecordRow>().enumerate() {
        let row = row?;
        let raw = row.date.clone();
        let rec = row.into_record().ok_or_else(|| {
            // header is line 1
            AppError::InvalidDate(format!("{raw} (line {})", i + 2))
        })?;
        rec.validate().map_err(|e| match e {
            AppError::InvalidInput(msg) => AppError::InvalidInput(format!("{msg} (line {})", i + 2)),
            other => other,
        })?;
        records.push(rec);
    }

    let read = records.len();
    let ledger = Ledger::from_records(records);
    let duplicates = read - ledger.len();
    if duplicates > 0 {
        warn!(duplicates, "repeated dates in import, last row wins");
    }
    Ok((ledger, duplicates))
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn import_sales(pool: &mut DbPool, file: &Path) -> AppResult<ImportSummary> {
        let f = std::fs::File::open(file)?;
        let (ledger, duplicates) = read_sales_csv(f)?;

        let tx = pool.conn.unchecked_transaction()?;
        let mut summary = ImportSummary {
            duplicates,
            ..Default::default()
        };
        for rec in &ledger {
            if upsert_day(&tx, rec)? {
                summary.updated += 1;
            } else {
                summary.inserted += 1;
            }
        }
        write_log(
            &tx,
            "import",
            &file.to_string_lossy(),
            &format!(
                "{} new, {} updated sales days",
                summary.inserted, summary.updated
            ),
        )?;
        tx.commit()?;

        debug!(?summary, "sales import done");
        Ok(summary)
    }
}
