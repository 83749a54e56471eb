use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse the date formats found in spreadsheet exports:
/// `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `DD/MM/YYYY`.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    parse_date(s)
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%d/%m/%Y").ok())
}

/// Same day one year earlier. Feb 29 becomes Feb 28.
pub fn one_year_before(date: NaiveDate) -> NaiveDate {
    // checked_sub_months clamps to the last valid day of the month
    date.checked_sub_months(Months::new(12)).unwrap_or(date)
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first
        .checked_add_months(Months::new(1))?
        .pred_opt()?;
    Some((first, last))
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    match month_bounds(year, month) {
        Some((first, last)) => first.iter_days().take_while(|d| *d <= last).collect(),
        None => Vec::new(),
    }
}

/// Monday of the ISO week containing `date`, and the Sunday closing it.
pub fn iso_week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64);
    (monday, monday + chrono::Duration::days(6))
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

pub fn weekday_name(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `Saturday · 15/06/2024`
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "{} · {}",
        weekday_name(date.weekday()),
        date.format("%d/%m/%Y")
    )
}
