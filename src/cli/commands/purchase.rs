use crate::cli::commands::{arg_date, arg_period};
use crate::cli::parser::PurchaseCmd;
use crate::config::Config;
use crate::core::purchases::{PurchaseLogic, purchase_totals};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::models::purchase::Purchase;
use crate::ui::messages::{header, info, success};
use crate::utils::date::month_name;
use crate::utils::formatting::{bold, money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &PurchaseCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        PurchaseCmd::Add {
            date,
            supplier,
            family,
            cost,
        } => {
            let purchase = Purchase::new(arg_date(date)?, supplier, *family, *cost);
            let id = PurchaseLogic::add(&mut pool, purchase)?;
            success(format!("Purchase #{id} recorded."));
        }

        PurchaseCmd::Del { id } => {
            PurchaseLogic::delete(&mut pool, *id)?;
            success(format!("Purchase #{id} deleted."));
        }

        PurchaseCmd::List { period } => {
            let period = arg_period(period)?;
            let rows = PurchaseLogic::list(&pool, period)?;
            if rows.is_empty() {
                info("No purchases recorded.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Date"),
                Column::left("Supplier"),
                Column::left("Family"),
                Column::right("Cost"),
            ])
            .with_separator(cfg.separator());

            for p in &rows {
                table.add_row(vec![
                    p.id.to_string(),
                    p.date.to_string(),
                    p.supplier.clone(),
                    p.family.label().to_string(),
                    money(p.cost, &cfg.currency),
                ]);
            }
            print!("{}", table.render());
            let total: f64 = rows.iter().map(|p| p.cost).sum();
            println!("{}", bold(&format!("Total: {}", money(total, &cfg.currency))));
        }

        PurchaseCmd::Monthly { year, month } => {
            let period = Period::from_parts(*year, *month)?;
            let rows = PurchaseLogic::list(&pool, Some(period))?;
            let totals = purchase_totals(&rows, period);

            header(format!("Purchases · {period}"));
            let mut table = Table::new(vec![Column::left("Month"), Column::right("Purchases")])
                .with_separator(cfg.separator());
            for (m, v) in &totals.rows {
                table.add_row(vec![month_name(*m).to_string(), money(*v, &cfg.currency)]);
            }
            print!("{}", table.render());
            println!("{}", bold(&format!("Total: {}", money(totals.total, &cfg.currency))));
        }
    }

    Ok(())
}
