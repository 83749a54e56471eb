//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Thousands-separated amount with two decimals: `12,345.60 €`.
pub fn money(v: f64, currency: &str) -> String {
    format!("{} {}", group_thousands(v, 2), currency)
}

/// Signed amount: `+200.00 €` / `-35.10 €`.
pub fn signed_money(v: f64, currency: &str) -> String {
    let sign = if v > 0.0 { "+" } else { "" };
    format!("{}{} {}", sign, group_thousands(v, 2), currency)
}

pub fn pct(v: f64) -> String {
    format!("{:.1} %", v)
}

pub fn signed_pct(v: f64) -> String {
    format!("{:+.1} %", v)
}

pub fn signed_int(v: i64) -> String {
    format!("{:+}", v)
}

fn group_thousands(v: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (raw.clone(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads badly
    let negative = v < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
