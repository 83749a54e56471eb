use crate::cli::parser::ImportCmd;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &ImportCmd, cfg: &Config) -> AppResult<()> {
    match cmd {
        ImportCmd::Sales { file } => {
            let path = expand_tilde(file);
            let mut pool = DbPool::open(&cfg.database)?;
            let summary = ImportLogic::import_sales(&mut pool, &path)?;

            if summary.duplicates > 0 {
                warning(format!(
                    "{} rows repeated an earlier date; the last one was kept.",
                    summary.duplicates
                ));
            }
            success(format!(
                "Imported {} new and {} updated sales days from {}",
                summary.inserted,
                summary.updated,
                path.display()
            ));
        }
    }
    Ok(())
}
