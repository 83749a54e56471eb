use crate::cli::parser::ReportCmd;
use crate::config::Config;
use crate::core::reports::{
    YearData, breakeven, ebitda_table, income_statement, operating_totals,
};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::period::Period;
use crate::ui::messages::{header, metric, note, warning};
use crate::utils::colors::{GREEN, GREY, RESET, colorize_delta};
use crate::utils::date::month_name;
use crate::utils::formatting::{bold, money, pct, signed_money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &ReportCmd, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;

    match report(cmd, cfg, &pool) {
        // Ratios undefined for the period are not fatal.
        Err(e) if e.is_ratio_failure() => {
            warning(e);
            Ok(())
        }
        other => other,
    }
}

fn report(cmd: &ReportCmd, cfg: &Config, pool: &DbPool) -> AppResult<()> {
    let cur = cfg.currency.as_str();

    match cmd {
        ReportCmd::Pnl { period } => {
            let period: Period = period.parse()?;
            let data = YearData::load(pool, period.year, cfg.ss_rate())?;
            let s = income_statement(&data, period)?;

            header(format!("Income statement · {period}"));
            metric("Revenue", money(s.revenue, cur));
            metric("Purchases", money(s.purchases, cur));
            metric("Inventory variation", signed_money(s.inventory_variation(), cur));
            metric("Cost of sales", money(s.cost_of_sales, cur));
            metric(
                "Gross margin",
                format!("{} ({})", money(s.gross_margin, cur), pct(s.gross_margin_pct * 100.0)),
            );
            metric("Personnel", money(s.personnel, cur));
            metric("Operating expenses", money(s.operating_expenses, cur));
            println!();
            metric(bold("EBITDA"), colorize_delta(&money(s.ebitda, cur), s.ebitda));
        }

        ReportCmd::Breakeven { period } => {
            let period: Period = period.parse()?;
            let data = YearData::load(pool, period.year, cfg.ss_rate())?;
            let b = breakeven(&data, period)?;

            header(format!("Breakeven · {period}"));
            metric("Revenue", money(b.revenue, cur));
            metric("Purchases", money(b.purchases, cur));
            metric("Gross margin", pct(b.margin_pct * 100.0));
            println!();

            let mut table = Table::new(vec![Column::left("Fixed cost"), Column::right("Amount")])
                .with_separator(cfg.separator());
            table.add_row(vec!["Personnel".to_string(), money(b.personnel, cur)]);
            for (category, amount) in &b.fixed_by_category {
                table.add_row(vec![category.label().to_string(), money(*amount, cur)]);
            }
            print!("{}", table.render());
            metric("Fixed costs", money(b.fixed_costs, cur));
            println!();

            metric(bold("Breakeven revenue"), money(b.breakeven, cur));
            metric("Coverage", pct(b.coverage_pct));
            if b.gap() > 0.0 {
                metric("Revenue still needed", money(b.gap(), cur));
            } else {
                println!("  {GREEN}Breakeven reached.{RESET}");
            }
        }

        ReportCmd::Ebitda { year, month } => {
            let period = Period::from_parts(*year, *month)?;
            let data = YearData::load(pool, *year, cfg.ss_rate())?;
            let rows = ebitda_table(&data, period);

            header(format!("EBITDA · {period}"));
            let mut table = Table::new(vec![
                Column::left("Month"),
                Column::right("Revenue"),
                Column::right("Purchases"),
                Column::right("Cost of sales"),
                Column::right("Personnel"),
                Column::right("Expenses"),
                Column::right("EBITDA"),
            ])
            .with_separator(cfg.separator());
            for r in &rows {
                table.add_row(vec![
                    month_name(r.month).to_string(),
                    money(r.revenue, cur),
                    money(r.purchases, cur),
                    money(r.cost_of_sales, cur),
                    money(r.personnel, cur),
                    money(r.operating_expenses, cur),
                    colorize_delta(&money(r.ebitda, cur), r.ebitda),
                ]);
            }
            print!("{}", table.render());

            let total: f64 = rows.iter().map(|r| r.ebitda).sum();
            println!("{}", bold(&format!("Total EBITDA: {}", money(total, cur))));
        }

        ReportCmd::Totals { year } => {
            let data = YearData::load(pool, *year, cfg.ss_rate())?;
            let t = operating_totals(&data);

            header(format!("Operating totals · {year}"));
            let mut table = Table::new(vec![
                Column::left("Month"),
                Column::right("Sales"),
                Column::right("Purchases"),
                Column::right("Expenses"),
                Column::right("Payroll"),
            ])
            .with_separator(cfg.separator());
            for r in t.rows.iter().chain(std::iter::once(&t.total)) {
                let label = if r.month == 0 {
                    bold("Total")
                } else {
                    month_name(r.month).to_string()
                };
                table.add_row(vec![
                    label,
                    money(r.sales, cur),
                    money(r.purchases, cur),
                    money(r.expenses, cur),
                    money(r.payroll, cur),
                ]);
            }
            print!("{}", table.render());

            let missing: Vec<&str> = t
                .coverage
                .iter()
                .filter(|(_, has)| !has)
                .map(|(name, _)| *name)
                .collect();
            if !missing.is_empty() {
                note(format!("No data recorded for: {}", missing.join(", ")));
            } else {
                println!("  {GREY}All registers hold data for {year}.{RESET}");
            }
        }
    }

    Ok(())
}
