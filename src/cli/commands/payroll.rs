use crate::cli::parser::PayrollCmd;
use crate::config::Config;
use crate::core::payroll::{PayrollLogic, payroll_year};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::position::{Position, parse_headcount};
use crate::ui::messages::{header, info, note, success};
use crate::utils::date::month_name;
use crate::utils::formatting::{bold, money};
use crate::utils::round2;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &PayrollCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        PayrollCmd::Add {
            year,
            name,
            gross,
            headcount,
        } => {
            let hc = parse_headcount(headcount).ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "headcount must be 1 or 12 comma-separated integers: {headcount}"
                ))
            })?;
            let position = Position::new(*year, name, *gross, hc);
            let id = PayrollLogic::add(&mut pool, &position)?;
            success(format!("Position #{id} '{}' added for {year}.", position.name));
        }

        PayrollCmd::Del { id } => {
            PayrollLogic::delete(&mut pool, *id)?;
            success(format!("Position #{id} deleted."));
        }

        PayrollCmd::List { year } => {
            let rows = PayrollLogic::list(&pool, *year)?;
            if rows.is_empty() {
                info("No positions defined.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::right("Year"),
                Column::left("Position"),
                Column::right("Gross/year"),
                Column::left("Headcount (Jan..Dec)"),
            ])
            .with_separator(cfg.separator());
            for p in &rows {
                table.add_row(vec![
                    p.id.to_string(),
                    p.year.to_string(),
                    p.name.clone(),
                    money(p.gross_annual, &cfg.currency),
                    p.headcount_csv(),
                ]);
            }
            print!("{}", table.render());
        }

        PayrollCmd::Monthly { year, no_ss } => {
            let positions = PayrollLogic::list(&pool, Some(*year))?;
            let rate = if *no_ss { 0.0 } else { cfg.ss_rate() };
            let months = payroll_year(&positions, *year, rate);

            header(format!("Payroll · {year}"));
            note(format!("Employer social security rate: {:.0} %", rate * 100.0));

            let mut table = Table::new(vec![
                Column::left("Month"),
                Column::right("Payroll"),
                Column::right("Social security"),
                Column::right("Employer cost"),
            ])
            .with_separator(cfg.separator());
            for m in &months {
                table.add_row(vec![
                    month_name(m.month).to_string(),
                    money(m.payroll, &cfg.currency),
                    money(m.social_security, &cfg.currency),
                    money(m.employer_cost, &cfg.currency),
                ]);
            }
            print!("{}", table.render());

            let total = round2(months.iter().map(|m| m.employer_cost).sum());
            println!(
                "{}",
                bold(&format!("Employer cost {year}: {}", money(total, &cfg.currency)))
            );
        }
    }

    Ok(())
}
