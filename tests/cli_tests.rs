use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, oyk, setup_test_db, temp_out};

fn add_day(db: &str, date: &str, morning: &str, afternoon: &str, night: &str) {
    oyk()
        .args([
            "--db",
            db,
            "sales",
            "add",
            date,
            "--morning",
            morning,
            "--afternoon",
            afternoon,
            "--night",
            night,
            "--diners-morning",
            "20",
            "--tickets-morning",
            "15",
        ])
        .assert()
        .success();
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    oyk()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());

    oyk()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Sales days"))
        .stdout(contains("missing").not());
}

#[test]
fn test_sales_today_compares_with_last_year() {
    let db_path = setup_test_db("cli_today");
    init_db(&db_path);

    add_day(&db_path, "2025-06-14", "400", "200", "400");
    add_day(&db_path, "2024-06-15", "300", "200", "300");

    for policy in ["nearest-weekday", "iso-week"] {
        oyk()
            .args([
                "--db",
                &db_path,
                "sales",
                "today",
                "--date",
                "2025-06-14",
                "--policy",
                policy,
            ])
            .assert()
            .success()
            .stdout(contains(policy))
            .stdout(contains("Saturday · 15/06/2024"))
            .stdout(contains("+25.0 %"));
    }
}

#[test]
fn test_policies_differ_across_year_boundary() {
    let db_path = setup_test_db("cli_policies");
    init_db(&db_path);

    add_day(&db_path, "2025-01-10", "500", "0", "0");

    oyk()
        .args([
            "--db",
            &db_path,
            "sales",
            "today",
            "--date",
            "2026-01-02",
            "--policy",
            "nearest-weekday",
        ])
        .assert()
        .success()
        .stdout(contains("Friday · 10/01/2025"));

    oyk()
        .args([
            "--db",
            &db_path,
            "sales",
            "today",
            "--date",
            "2026-01-02",
            "--policy",
            "iso-week",
        ])
        .assert()
        .success()
        .stdout(contains("no comparable history"));
}

#[test]
fn test_sales_add_overwrites_and_del() {
    let db_path = setup_test_db("cli_overwrite");
    init_db(&db_path);

    add_day(&db_path, "2025-03-01", "100", "0", "0");

    oyk()
        .args(["--db", &db_path, "sales", "add", "2025-03-01", "--morning", "150"])
        .assert()
        .success()
        .stdout(contains("updated"));

    oyk()
        .args(["--db", &db_path, "sales", "close", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("150.00"));

    oyk()
        .args(["--db", &db_path, "sales", "del", "2025-03-01"])
        .assert()
        .success();

    oyk()
        .args(["--db", &db_path, "sales", "del", "2025-03-01"])
        .assert()
        .failure()
        .stderr(contains("No sales record found"));
}

#[test]
fn test_sales_add_rejects_negative_sales() {
    let db_path = setup_test_db("cli_negative_sales");
    init_db(&db_path);

    oyk()
        .args(["--db", &db_path, "sales", "add", "2025-06-14", "--morning=-5000"])
        .assert()
        .failure()
        .stderr(contains("Invalid input"));

    oyk()
        .args(["--db", &db_path, "sales", "close", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(contains("No sales recorded"));
}

#[test]
fn test_sales_add_with_huge_counts() {
    let db_path = setup_test_db("cli_huge_counts");
    init_db(&db_path);

    oyk()
        .args([
            "--db",
            &db_path,
            "sales",
            "add",
            "2025-06-14",
            "--morning",
            "10",
            "--diners-morning",
            "4294967295",
            "--diners-night",
            "1",
        ])
        .assert()
        .success();

    oyk()
        .args(["--db", &db_path, "sales", "close", "--period", "2025-06"])
        .assert()
        .success()
        .stdout(contains("4294967296"));
}

#[test]
fn test_breakeven_without_revenue_is_a_warning() {
    let db_path = setup_test_db("cli_breakeven_empty");
    init_db(&db_path);

    oyk()
        .args(["--db", &db_path, "report", "breakeven", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("revenue must be greater than zero"));
}

#[test]
fn test_breakeven_report() {
    let db_path = setup_test_db("cli_breakeven");
    init_db(&db_path);

    add_day(&db_path, "2025-02-10", "6000", "2000", "2000");

    oyk()
        .args(["--db", &db_path, "supplier", "add", "Makro"])
        .assert()
        .success();
    oyk()
        .args([
            "--db",
            &db_path,
            "purchase",
            "add",
            "2025-02-11",
            "--supplier",
            "makro",
            "--family",
            "raw-material",
            "--cost",
            "3000",
        ])
        .assert()
        .success();
    oyk()
        .args([
            "--db",
            &db_path,
            "expense",
            "add",
            "2025-02-01",
            "--concept",
            "Rent",
            "--category",
            "rent",
            "--cost",
            "1400",
        ])
        .assert()
        .success();

    // margin 70 %, fixed costs 1400 -> breakeven 2000
    oyk()
        .args(["--db", &db_path, "report", "breakeven", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("70.0 %"))
        .stdout(contains("2,000.00"))
        .stdout(contains("Breakeven reached"));
}

#[test]
fn test_purchase_with_unknown_supplier_fails() {
    let db_path = setup_test_db("cli_unknown_supplier");
    init_db(&db_path);

    oyk()
        .args([
            "--db",
            &db_path,
            "purchase",
            "add",
            "2025-02-11",
            "--supplier",
            "Nobody",
            "--family",
            "beverages",
            "--cost",
            "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Unknown supplier 'Nobody'"));
}

#[test]
fn test_payroll_monthly_cost() {
    let db_path = setup_test_db("cli_payroll");
    init_db(&db_path);

    oyk()
        .args([
            "--db",
            &db_path,
            "payroll",
            "add",
            "--year",
            "2025",
            "--name",
            "Cook",
            "--gross",
            "24000",
            "--headcount",
            "1",
        ])
        .assert()
        .success();

    oyk()
        .args(["--db", &db_path, "payroll", "monthly", "--year", "2025", "--no-ss"])
        .assert()
        .success()
        .stdout(contains("2,000.00"))
        .stdout(contains("24,000.00"));

    oyk()
        .args([
            "--db",
            &db_path,
            "payroll",
            "add",
            "--year",
            "2025",
            "--name",
            "Waiter",
            "--gross",
            "18000",
            "--headcount",
            "1,2,3",
        ])
        .assert()
        .failure()
        .stderr(contains("headcount"));
}

#[test]
fn test_import_legacy_csv_and_month_log() {
    let db_path = setup_test_db("cli_import");
    init_db(&db_path);

    let csv_path = temp_out("cli_import_legacy", "csv");
    fs::write(
        &csv_path,
        "fecha,ventas_manana_eur,ventas_tarde_eur,ventas_noche_eur,comensales_manana,tickets_manana,observaciones\n\
         2025-04-01,100,200,300,10,8,\n\
         2025-04-02,50,50,50,5,4,Terrace closed\n",
    )
    .expect("write csv");

    oyk()
        .args(["--db", &db_path, "import", "sales", "--file", &csv_path])
        .assert()
        .success()
        .stdout(contains("Imported 2 new"));

    oyk()
        .args(["--db", &db_path, "sales", "month", "--period", "2025-04"])
        .assert()
        .success()
        .stdout(contains("2025-04-01"))
        .stdout(contains("Terrace closed"))
        .stdout(contains("600.00"));
}

#[test]
fn test_export_sales_csv() {
    let db_path = setup_test_db("cli_export");
    init_db(&db_path);

    add_day(&db_path, "2025-05-01", "100", "0", "0");
    add_day(&db_path, "2025-06-01", "200", "0", "0");

    let out = temp_out("cli_export_sales", "csv");
    oyk()
        .args([
            "--db", &db_path, "export", "--table", "sales", "--format", "csv", "--file", &out,
            "--range", "2025-05",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("export written");
    assert!(content.starts_with("date,sales_morning"));
    assert!(content.contains("2025-05-01"));
    assert!(!content.contains("2025-06-01"));

    oyk()
        .args([
            "--db", &db_path, "export", "--table", "sales", "--format", "json", "--file", &out,
            "--force",
        ])
        .assert()
        .success();
    let json = fs::read_to_string(&out).expect("export written");
    assert!(json.contains("\"date\": \"2025-06-01\""));
}

#[test]
fn test_export_rejects_relative_path() {
    let db_path = setup_test_db("cli_export_relative");
    init_db(&db_path);

    oyk()
        .args([
            "--db", &db_path, "export", "--table", "purchases", "--file", "out.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_backup_and_log() {
    let db_path = setup_test_db("cli_backup");
    init_db(&db_path);
    add_day(&db_path, "2025-07-01", "100", "0", "0");

    let copy = temp_out("cli_backup_copy", "sqlite");
    let zip = copy.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    oyk()
        .args(["--db", &db_path, "backup", "--file", &copy, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(fs::metadata(&zip).is_ok());
    assert!(fs::metadata(&copy).is_err());

    oyk()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("backup"))
        .stdout(contains("2025-07-01"));
}
