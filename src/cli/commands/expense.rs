use crate::cli::commands::{arg_date, arg_period};
use crate::cli::parser::ExpenseCmd;
use crate::config::Config;
use crate::core::expenses::{ExpenseLogic, expense_totals};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::expense::Expense;
use crate::models::period::Period;
use crate::ui::messages::{header, info, success};
use crate::utils::date::month_name;
use crate::utils::formatting::{bold, money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &ExpenseCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        ExpenseCmd::Add {
            date,
            concept,
            category,
            kind,
            cost,
        } => {
            let expense = Expense::new(arg_date(date)?, concept, *category, *kind, *cost);
            let id = ExpenseLogic::add(&mut pool, &expense)?;
            success(format!("Expense #{id} recorded."));
        }

        ExpenseCmd::Del { id } => {
            ExpenseLogic::delete(&mut pool, *id)?;
            success(format!("Expense #{id} deleted."));
        }

        ExpenseCmd::List { period } => {
            let rows = ExpenseLogic::list(&pool, arg_period(period)?)?;
            if rows.is_empty() {
                info("No expenses recorded.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Date"),
                Column::left("Concept"),
                Column::left("Category"),
                Column::left("Kind"),
                Column::right("Cost"),
            ])
            .with_separator(cfg.separator());

            for e in &rows {
                table.add_row(vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    e.concept.clone(),
                    e.category.label().to_string(),
                    e.kind.to_db_str().to_string(),
                    money(e.cost, &cfg.currency),
                ]);
            }
            print!("{}", table.render());
            let total: f64 = rows.iter().map(|e| e.cost).sum();
            println!("{}", bold(&format!("Total: {}", money(total, &cfg.currency))));
        }

        ExpenseCmd::Monthly { year, month } => {
            let period = Period::from_parts(*year, *month)?;
            let rows = ExpenseLogic::list(&pool, Some(period))?;
            let all = expense_totals(&rows, period);
            let fixed: Vec<Expense> = rows.iter().filter(|e| e.is_fixed()).cloned().collect();
            let fixed = expense_totals(&fixed, period);

            header(format!("Operating expenses · {period}"));
            let mut table = Table::new(vec![
                Column::left("Month"),
                Column::right("Fixed"),
                Column::right("Total"),
            ])
            .with_separator(cfg.separator());
            for (m, v) in &all.rows {
                table.add_row(vec![
                    month_name(*m).to_string(),
                    money(fixed.month(*m), &cfg.currency),
                    money(*v, &cfg.currency),
                ]);
            }
            print!("{}", table.render());
            println!("{}", bold(&format!("Total: {}", money(all.total, &cfg.currency))));
        }
    }

    Ok(())
}
