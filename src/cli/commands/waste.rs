use crate::cli::commands::{arg_date, arg_period};
use crate::cli::parser::WasteCmd;
use crate::config::Config;
use crate::core::waste::{WasteLogic, totals_by_unit};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::waste::WasteEntry;
use crate::ui::messages::{info, metric, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &WasteCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        WasteCmd::Add {
            date,
            family,
            product,
            unit,
            quantity,
            reason,
        } => {
            let entry = WasteEntry::new(arg_date(date)?, *family, product, *unit, *quantity, *reason);
            let id = WasteLogic::add(&mut pool, &entry)?;
            success(format!("Waste entry #{id} recorded."));
        }

        WasteCmd::List { period } => {
            let rows = WasteLogic::list(&pool, arg_period(period)?)?;
            if rows.is_empty() {
                info("No waste recorded.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Date"),
                Column::left("Family"),
                Column::left("Product"),
                Column::right("Quantity"),
                Column::left("Unit"),
                Column::left("Reason"),
            ])
            .with_separator(cfg.separator());
            for w in &rows {
                table.add_row(vec![
                    w.id.to_string(),
                    w.date.to_string(),
                    w.family.label().to_string(),
                    w.product.clone(),
                    format!("{:.2}", w.quantity),
                    w.unit.to_db_str().to_string(),
                    w.reason.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());

            println!();
            for (unit, qty) in totals_by_unit(&rows) {
                metric(format!("Total {}", unit.to_db_str()), format!("{qty:.2}"));
            }
        }
    }

    Ok(())
}
