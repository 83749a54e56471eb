use crate::cli::commands::arg_date;
use crate::cli::parser::InventoryCmd;
use crate::config::Config;
use crate::core::inventory::InventoryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::inventory::InventoryCount;
use crate::ui::messages::{info, success};
use crate::utils::formatting::money;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &InventoryCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        InventoryCmd::Set { date, value } => {
            let count = InventoryCount {
                date: arg_date(date)?,
                value: *value,
            };
            InventoryLogic::set(&mut pool, count)?;
            success(format!(
                "Inventory on {} set to {}",
                count.date,
                money(count.value, &cfg.currency)
            ));
        }
        InventoryCmd::List => {
            let counts = InventoryLogic::list(&pool)?;
            if counts.is_empty() {
                info("No inventory counts recorded.");
                return Ok(());
            }
            let mut table = Table::new(vec![Column::left("Date"), Column::right("Value")])
                .with_separator(cfg.separator());
            for c in &counts {
                table.add_row(vec![c.date.to_string(), money(c.value, &cfg.currency)]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
