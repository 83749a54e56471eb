#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use oyken::models::daily_record::{DailyRecord, ShiftValues};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn oyk() -> Command {
    cargo_bin_cmd!("oyken")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_oyken.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a fresh database through the CLI
pub fn init_db(db_path: &str) {
    oyk()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Day with all sales, diners and tickets in the morning shift.
pub fn day(date: &str, sales: f64, diners: u32, tickets: u32) -> DailyRecord {
    DailyRecord::new(
        d(date),
        ShiftValues::new(sales, 0.0, 0.0),
        ShiftValues::new(diners, 0, 0),
        ShiftValues::new(tickets, 0, 0),
        "",
    )
}

/// Day with explicit per-shift sales and no customers.
pub fn shifts(date: &str, morning: f64, afternoon: f64, night: f64) -> DailyRecord {
    DailyRecord::new(
        d(date),
        ShiftValues::new(morning, afternoon, night),
        ShiftValues::default(),
        ShiftValues::default(),
        "",
    )
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
