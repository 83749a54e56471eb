use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{strip_ansi, visible_width};
use ansi_term::Colour;

const MAX_TARGET_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "import" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)` with the operation coloured, cut to `max` visible cells.
fn format_op_target(row: &LogRow, max: usize) -> String {
    let color = color_for_operation(&row.operation);
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    let visible = if plain.chars().count() > max {
        let mut s: String = plain.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let lines: Vec<(String, String, &LogRow)> = entries
            .iter()
            .map(|row| {
                let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| row.date.clone());
                (date, format_op_target(row, MAX_TARGET_WIDTH), row)
            })
            .collect();

        let id_w = entries.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = lines.iter().map(|(d, _, _)| d.len()).max().unwrap_or(10);
        let op_w = lines
            .iter()
            .map(|(_, op, _)| visible_width(op))
            .max()
            .unwrap_or(10)
            .min(MAX_TARGET_WIDTH);

        println!("📜 Internal log:\n");

        for (date, op_target, row) in &lines {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op_target).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                date,
                op_target,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
