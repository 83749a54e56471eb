use crate::cli::parser::SupplierCmd;
use crate::config::Config;
use crate::core::purchases::PurchaseLogic;
use crate::db::pool::DbPool;
use crate::db::purchases::load_suppliers;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &SupplierCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        SupplierCmd::Add { name } => {
            PurchaseLogic::add_supplier(&mut pool, name)?;
            success(format!("Supplier '{}' registered.", name.trim()));
        }
        SupplierCmd::List => {
            let names = load_suppliers(&pool.conn)?;
            if names.is_empty() {
                info("No suppliers registered.");
            }
            for n in names {
                println!("  • {n}");
            }
        }
    }

    Ok(())
}
