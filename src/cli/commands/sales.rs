use crate::cli::commands::{arg_date, arg_date_or_today, arg_month_or_current};
use crate::cli::parser::{DayEntry, SalesCmd};
use crate::config::Config;
use crate::core::comparator::Variance;
use crate::core::sales::{SalesLogic, ShiftComparison, month_close, month_log, today_report};
use crate::core::trends::{behaviour, trend_report};
use crate::db::pool::DbPool;
use crate::db::sales::load_ledger;
use crate::errors::AppResult;
use crate::models::daily_record::{DailyRecord, ShiftValues};
use crate::ui::messages::{header, info, metric, note, success, warning};
use crate::utils::colors::{GREY, RESET, YELLOW, colorize_delta};
use crate::utils::date::{day_label, month_name};
use crate::utils::formatting::{money, pct, signed_int, signed_money, signed_pct};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &SalesCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::open(&cfg.database)?;

    match cmd {
        SalesCmd::Add { date, entry } => {
            let record = to_record(arg_date(date)?, entry);
            let replaced = SalesLogic::record_day(&mut pool, &record)?;
            if replaced {
                success(format!("Sales for {} updated.", day_label(record.date)));
            } else {
                success(format!("Sales for {} recorded.", day_label(record.date)));
            }
            metric("Total sales", money(record.total_sales(), &cfg.currency));
        }

        SalesCmd::Del { date } => {
            let d = arg_date(date)?;
            SalesLogic::delete_day(&mut pool, d)?;
            success(format!("Sales for {} deleted.", day_label(d)));
        }

        SalesCmd::Today { date, policy } => {
            let anchor = arg_date_or_today(date)?;
            let policy = policy.unwrap_or(cfg.compare_policy);
            let ledger = load_ledger(&pool.conn, None)?;
            let report = today_report(&ledger, anchor, policy)?;

            header(format!("Daily control · {}", day_label(anchor)));
            metric("Comparison policy", policy);
            metric("Compared with", &report.pair.label);
            if report.pair.current.is_zero() {
                note("No sales recorded for this day yet.");
            }
            let base = report.pair.baseline();
            metric("Sales", money(report.pair.current.total_sales(), &cfg.currency));
            metric("Comparable sales", money(base.total_sales(), &cfg.currency));
            println!();
            print_comparison(&report.lines, &cfg.currency, cfg.separator());
        }

        SalesCmd::Month { period } => {
            let (year, month) = arg_month_or_current(period)?;
            let ledger = load_ledger(&pool.conn, None)?;
            let rows = month_log(&ledger, year, month)?;

            header(format!("Sales log · {} {}", month_name(month), year));
            let mut table = Table::new(vec![
                Column::left("Date"),
                Column::right("Morning"),
                Column::right("Afternoon"),
                Column::right("Night"),
                Column::right("Total"),
                Column::right("Diners"),
                Column::right("Tickets"),
                Column::left("Notes"),
            ])
            .with_separator(cfg.separator());

            for r in rows {
                let date = if r.has_notes() {
                    format!("{YELLOW}{} *{RESET}", r.date)
                } else {
                    r.date.to_string()
                };
                table.add_row(vec![
                    date,
                    money(r.sales.morning, &cfg.currency),
                    money(r.sales.afternoon, &cfg.currency),
                    money(r.sales.night, &cfg.currency),
                    money(r.total_sales(), &cfg.currency),
                    r.total_diners().to_string(),
                    r.total_tickets().to_string(),
                    r.notes.clone(),
                ]);
            }
            print!("{}", table.render());
            note("* day with notes");
        }

        SalesCmd::Close { period } => {
            let (year, month) = arg_month_or_current(period)?;
            let ledger = load_ledger(&pool.conn, None)?;
            let close = month_close(&ledger, year, month)?;

            header(format!("Monthly close · {}", close.period));
            if close.days_operated == 0 {
                warning(format!("No sales recorded in {}.", close.period));
            }
            metric("Sales", money(close.sales_total, &cfg.currency));
            metric("Days operated", close.days_operated);
            metric("Diners", close.diners);
            metric("Tickets", close.tickets);
            metric("Average ticket", money(close.average_ticket, &cfg.currency));
        }

        SalesCmd::Trends { date } => {
            let anchor = arg_date_or_today(date)?;
            let ledger = load_ledger(&pool.conn, None)?;
            let report = trend_report(ledger.records(), anchor)?;

            header(format!("Trends up to {}", day_label(anchor)));

            match report.moving_average {
                Some(ma) => metric(
                    "7-day moving average",
                    format!(
                        "{} ({})",
                        money(ma, &cfg.currency),
                        colorize_delta(&signed_pct(report.direction.pct), report.direction.pct)
                    ),
                ),
                None => metric("7-day moving average", format!("{GREY}not enough days{RESET}")),
            }
            metric(
                "Weekly variation (CV)",
                format!("{} over {} weeks", pct(report.weekly_cv), report.weekly_totals.len()),
            );

            println!("\n  Weekly rhythm (share of the anchor's week):");
            for s in &report.weekday_shares {
                println!("    {:<10} {:>7}", s.name(), pct(s.pct));
            }
            if let (Some(strong), Some(weak)) = (&report.strong_day, &report.weak_day) {
                metric("Strong day", format!("{} ({})", strong.name(), pct(strong.pct)));
                metric("Weak day", format!("{} ({})", weak.name(), pct(weak.pct)));
            }

            metric(
                "Tickets per diner",
                format!(
                    "{:.2} ({})",
                    report.tickets_per_diner,
                    colorize_delta(
                        &format!("{:+.2}", report.tickets_per_diner_delta),
                        report.tickets_per_diner_delta
                    )
                ),
            );

            println!();
            if report.alerts.is_empty() {
                info("No relevant alerts.");
            }
            for a in &report.alerts {
                warning(a.message());
            }
        }

        SalesCmd::Behaviour { date } => {
            let anchor = arg_date_or_today(date)?;
            let ledger = load_ledger(&pool.conn, None)?;
            let b = behaviour(ledger.records(), anchor)?;

            header("Customer behaviour · current week");
            note(format!(
                "{} → {}",
                b.first_day.format("%d/%m/%Y"),
                b.last_day.format("%d/%m/%Y")
            ));
            metric("Sales", money(b.sales, &cfg.currency));
            metric("Diners", b.diners);
            metric("Tickets", b.tickets);
            metric("Tickets per diner", format!("{:.2}", b.tickets_per_diner));
            metric("Sales per diner", money(b.sales_per_diner, &cfg.currency));
            println!();

            let mut table = Table::new(vec![
                Column::left("Shift"),
                Column::right("Per diner"),
                Column::right("Tickets/diner"),
                Column::right("Share"),
            ])
            .with_separator(cfg.separator());
            for s in &b.shifts {
                table.add_row(vec![
                    s.shift.label().to_string(),
                    money(s.sales_per_diner, &cfg.currency),
                    format!("{:.2}", s.tickets_per_diner),
                    pct(s.share_pct),
                ]);
            }
            print!("{}", table.render());

            println!();
            for r in &b.readings {
                println!("  • {r}");
            }
        }
    }

    Ok(())
}

fn to_record(date: NaiveDate, e: &DayEntry) -> DailyRecord {
    DailyRecord::new(
        date,
        ShiftValues::new(e.sales_morning, e.sales_afternoon, e.sales_night),
        ShiftValues::new(e.diners_morning, e.diners_afternoon, e.diners_night),
        ShiftValues::new(e.tickets_morning, e.tickets_afternoon, e.tickets_night),
        e.notes.as_str(),
    )
}

fn variance_cell(v: &Variance, currency: &str) -> String {
    colorize_delta(
        &format!(
            "{} ({}) {}",
            signed_money(v.delta, currency),
            signed_pct(v.pct),
            v.signal().icon()
        ),
        v.delta,
    )
}

fn print_comparison(lines: &[ShiftComparison], currency: &str, sep: char) {
    let mut table = Table::new(vec![
        Column::left("Shift"),
        Column::right("Sales"),
        Column::right("Diners"),
        Column::right("Tickets"),
        Column::right("Average ticket"),
    ])
    .with_separator(sep);

    for l in lines {
        let name = l.shift.map_or("Total", |s| s.label());
        table.add_row(vec![
            name.to_string(),
            variance_cell(&l.sales, currency),
            colorize_delta(&signed_int(l.diners_delta), l.diners_delta as f64),
            colorize_delta(&signed_int(l.tickets_delta), l.tickets_delta as f64),
            variance_cell(&l.average_ticket, currency),
        ]);
    }

    print!("{}", table.render());
}
