use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        table,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&pool, *table, *format, file, range.as_deref(), *force)?;
    }
    Ok(())
}
