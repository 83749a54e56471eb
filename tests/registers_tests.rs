use oyken::core::expenses::{ExpenseLogic, fixed_by_category};
use oyken::core::import::read_sales_csv;
use oyken::core::inventory::InventoryLogic;
use oyken::core::payroll::PayrollLogic;
use oyken::core::purchases::{PurchaseLogic, purchase_totals};
use oyken::core::sales::{SalesLogic, month_close};
use oyken::core::waste::{WasteLogic, totals_by_unit};
use oyken::db::log::load_log;
use oyken::db::pool::DbPool;
use oyken::db::sales::{load_day, load_ledger};
use oyken::errors::AppError;
use oyken::export::range::parse_range;
use oyken::models::daily_record::{DailyRecord, ShiftValues};
use oyken::models::expense::{CostKind, Expense, ExpenseCategory};
use oyken::models::inventory::InventoryCount;
use oyken::models::period::Period;
use oyken::models::position::Position;
use oyken::models::purchase::{Family, Purchase};
use oyken::models::waste::{Unit, WasteEntry, WasteReason};

mod common;
use common::{d, day};

fn pool() -> DbPool {
    DbPool::in_memory().expect("in-memory db")
}

#[test]
fn sales_day_is_overwritten_and_logged() {
    let mut pool = pool();

    assert!(!SalesLogic::record_day(&mut pool, &day("2025-05-01", 500.0, 20, 15)).unwrap());
    assert!(SalesLogic::record_day(&mut pool, &day("2025-05-01", 650.0, 25, 18)).unwrap());

    let stored = load_day(&pool.conn, d("2025-05-01")).unwrap().expect("stored");
    assert_eq!(stored.total_sales(), 650.0);
    assert_eq!(load_ledger(&pool.conn, None).unwrap().len(), 1);

    let ops: Vec<String> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|r| r.operation)
        .filter(|op| op != "migration_applied")
        .collect();
    assert_eq!(ops, vec!["add", "edit"]);

    SalesLogic::delete_day(&mut pool, d("2025-05-01")).unwrap();
    assert!(matches!(
        SalesLogic::delete_day(&mut pool, d("2025-05-01")),
        Err(AppError::NoRecordForDate(_))
    ));
}

#[test]
fn sales_day_rejects_negative_or_non_finite_amounts() {
    let mut pool = pool();

    for bad in [-5000.0, f64::NAN, f64::INFINITY] {
        let rec = DailyRecord::new(
            d("2025-06-14"),
            ShiftValues::new(bad, 0.0, 0.0),
            ShiftValues::default(),
            ShiftValues::default(),
            "",
        );
        assert!(
            matches!(
                SalesLogic::record_day(&mut pool, &rec),
                Err(AppError::InvalidInput(_))
            ),
            "{bad} should be rejected"
        );
    }
    assert!(load_ledger(&pool.conn, None).unwrap().is_empty());

    // zero is a valid closed shift
    assert!(!SalesLogic::record_day(&mut pool, &day("2025-06-14", 0.0, 0, 0)).unwrap());
}

#[test]
fn day_totals_do_not_overflow_shift_counts() {
    let mut pool = pool();
    let rec = DailyRecord::new(
        d("2025-06-14"),
        ShiftValues::new(10.0, 0.0, 0.0),
        ShiftValues::new(u32::MAX, 0, 1),
        ShiftValues::new(u32::MAX, u32::MAX, u32::MAX),
        "",
    );
    assert_eq!(rec.total_diners(), u64::from(u32::MAX) + 1);
    assert_eq!(rec.total_tickets(), 3 * u64::from(u32::MAX));

    SalesLogic::record_day(&mut pool, &rec).unwrap();
    SalesLogic::record_day(&mut pool, &rec_on(&rec, "2025-06-15")).unwrap();

    let ledger = load_ledger(&pool.conn, None).unwrap();
    let close = month_close(&ledger, 2025, 6).unwrap();
    assert_eq!(close.diners, 2 * (u64::from(u32::MAX) + 1));
    assert_eq!(close.tickets, 6 * u64::from(u32::MAX));
}

fn rec_on(rec: &DailyRecord, date: &str) -> DailyRecord {
    DailyRecord {
        date: d(date),
        ..rec.clone()
    }
}

#[test]
fn purchases_need_a_registered_supplier() {
    let mut pool = pool();

    let unknown = Purchase::new(d("2025-02-03"), "Makro", Family::RawMaterial, 120.0);
    assert!(matches!(
        PurchaseLogic::add(&mut pool, unknown),
        Err(AppError::UnknownSupplier(_))
    ));

    PurchaseLogic::add_supplier(&mut pool, "Makro").unwrap();
    assert!(matches!(
        PurchaseLogic::add_supplier(&mut pool, "makro"),
        Err(AppError::DuplicateSupplier(_))
    ));
    assert!(matches!(
        PurchaseLogic::add_supplier(&mut pool, "   "),
        Err(AppError::InvalidInput(_))
    ));

    let id = PurchaseLogic::add(
        &mut pool,
        Purchase::new(d("2025-02-03"), "MAKRO", Family::RawMaterial, 120.0),
    )
    .unwrap();
    PurchaseLogic::add(
        &mut pool,
        Purchase::new(d("2025-03-10"), "Makro", Family::Beverages, 80.5),
    )
    .unwrap();

    assert!(matches!(
        PurchaseLogic::add(
            &mut pool,
            Purchase::new(d("2025-03-10"), "Makro", Family::Other, 0.0)
        ),
        Err(AppError::InvalidInput(_))
    ));

    let all = PurchaseLogic::list(&pool, None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].supplier, "Makro");

    let totals = purchase_totals(&all, Period::year(2025));
    assert_eq!(totals.month(2), 120.0);
    assert_eq!(totals.month(3), 80.5);
    assert_eq!(totals.total, 200.5);

    let march = PurchaseLogic::list(&pool, Some(Period::month(2025, 3).unwrap())).unwrap();
    assert_eq!(march.len(), 1);

    PurchaseLogic::delete(&mut pool, id).unwrap();
    assert!(matches!(
        PurchaseLogic::delete(&mut pool, id),
        Err(AppError::NotFound("Purchase", _))
    ));
}

#[test]
fn expenses_split_fixed_and_variable() {
    let mut pool = pool();
    for e in [
        Expense::new(d("2025-04-01"), "Rent", ExpenseCategory::Rent, CostKind::Fixed, 1200.0),
        Expense::new(d("2025-04-05"), "Power", ExpenseCategory::Utilities, CostKind::Fixed, 300.0),
        Expense::new(d("2025-04-20"), "Power", ExpenseCategory::Utilities, CostKind::Fixed, 50.0),
        Expense::new(d("2025-04-09"), "Ads", ExpenseCategory::Marketing, CostKind::Variable, 90.0),
    ] {
        ExpenseLogic::add(&mut pool, &e).unwrap();
    }

    let april = Period::month(2025, 4).unwrap();
    let rows = ExpenseLogic::list(&pool, Some(april)).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(
        fixed_by_category(&rows, april),
        vec![
            (ExpenseCategory::Rent, 1200.0),
            (ExpenseCategory::Utilities, 350.0)
        ]
    );
}

#[test]
fn positions_round_trip_through_the_database() {
    let mut pool = pool();
    let mut hc = [2u32; 12];
    hc[7] = 0;
    let id = PayrollLogic::add(&mut pool, &Position::new(2025, "Cook", 24000.0, hc)).unwrap();
    PayrollLogic::add(&mut pool, &Position::new(2024, "Cook", 22000.0, [1; 12])).unwrap();

    let positions = PayrollLogic::list(&pool, Some(2025)).unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].id, id);
    assert_eq!(positions[0].headcount, hc);
    assert_eq!(PayrollLogic::list(&pool, None).unwrap().len(), 2);

    PayrollLogic::delete(&mut pool, id).unwrap();
    assert!(PayrollLogic::delete(&mut pool, id).is_err());
}

#[test]
fn waste_totals_stay_in_physical_units() {
    let mut pool = pool();
    for w in [
        WasteEntry::new(d("2025-06-01"), Family::RawMaterial, "Tomato", Unit::Kg, 1.5, WasteReason::Spoilage),
        WasteEntry::new(d("2025-06-02"), Family::RawMaterial, "Onion", Unit::Kg, 0.25, WasteReason::Expired),
        WasteEntry::new(d("2025-06-02"), Family::Beverages, "Cola", Unit::Units, 3.0, WasteReason::Breakage),
    ] {
        WasteLogic::add(&mut pool, &w).unwrap();
    }

    let rows = WasteLogic::list(&pool, None).unwrap();
    let totals = totals_by_unit(&rows);
    assert_eq!(totals.get(&Unit::Kg), Some(&1.75));
    assert_eq!(totals.get(&Unit::Units), Some(&3.0));
    assert_eq!(totals.get(&Unit::L), None);
}

#[test]
fn inventory_count_is_replaced_per_day() {
    let mut pool = pool();
    InventoryLogic::set(&mut pool, InventoryCount { date: d("2025-01-31"), value: 900.0 }).unwrap();
    InventoryLogic::set(&mut pool, InventoryCount { date: d("2025-01-31"), value: 950.0 }).unwrap();
    assert!(matches!(
        InventoryLogic::set(&mut pool, InventoryCount { date: d("2025-02-28"), value: -1.0 }),
        Err(AppError::InvalidInput(_))
    ));

    let counts = InventoryLogic::list(&pool).unwrap();
    assert_eq!(counts, vec![InventoryCount { date: d("2025-01-31"), value: 950.0 }]);
}

#[test]
fn legacy_spreadsheet_headers_are_accepted() {
    let csv = "\
fecha,ventas_manana_eur,ventas_tarde_eur,ventas_noche_eur,ventas_total_eur,comensales_manana,tickets_manana,observaciones
2025-01-03 00:00:00,100.5,200,300,999,10,8,Rainy day
04/01/2025,50,,25,0,5,4,
2025-01-03,110,0,0,0,11,9,
";
    let (ledger, duplicates) = read_sales_csv(csv.as_bytes()).unwrap();

    assert_eq!(duplicates, 1);
    assert_eq!(ledger.len(), 2);

    // the repeated date keeps the last row
    let jan3 = ledger.get(d("2025-01-03")).expect("jan 3");
    assert_eq!(jan3.total_sales(), 110.0);
    assert_eq!(jan3.diners.morning, 11);

    // stored totals are ignored and missing columns default to zero
    let jan4 = ledger.get(d("2025-01-04")).expect("jan 4");
    assert_eq!(jan4.total_sales(), 75.0);
    assert_eq!(jan4.diners.night, 0);
}

#[test]
fn unreadable_import_date_reports_the_line() {
    let csv = "date,sales_morning\n2025-01-01,10\nnot-a-date,20\n";
    match read_sales_csv(csv.as_bytes()) {
        Err(AppError::InvalidDate(msg)) => assert!(msg.contains("line 3")),
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn negative_import_amount_reports_the_line() {
    let csv = "date,sales_morning,sales_night\n2025-01-01,10,0\n2025-01-02,20,-3\n";
    match read_sales_csv(csv.as_bytes()) {
        Err(AppError::InvalidInput(msg)) => {
            assert!(msg.contains("line 3"), "{msg}");
            assert!(msg.contains("night"), "{msg}");
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn float_counts_from_spreadsheets_are_accepted() {
    let csv = "\
fecha,ventas_manana_eur,comensales_manana,comensales_noche,tickets_manana
2025-01-03,120,12.0,,9.0
";
    let (ledger, _) = read_sales_csv(csv.as_bytes()).unwrap();
    let jan3 = ledger.get(d("2025-01-03")).expect("jan 3");
    assert_eq!(jan3.diners.morning, 12);
    assert_eq!(jan3.diners.night, 0);
    assert_eq!(jan3.tickets.morning, 9);

    for bad in ["12.5", "-1", "5000000000"] {
        let csv = format!("date,diners_morning\n2025-01-03,{bad}\n");
        assert!(
            matches!(read_sales_csv(csv.as_bytes()), Err(AppError::Csv(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn export_ranges() {
    assert_eq!(parse_range("2025").unwrap(), (d("2025-01-01"), d("2025-12-31")));
    assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
    assert_eq!(
        parse_range("2025-01:2025-03").unwrap(),
        (d("2025-01-01"), d("2025-03-31"))
    );
    assert_eq!(
        parse_range("2025-01-05:2025-01-07").unwrap(),
        (d("2025-01-05"), d("2025-01-07"))
    );

    for bad in ["2025-01:2025", "2025-03:2025-01", "25", "2025-13", "abc"] {
        assert!(
            matches!(parse_range(bad), Err(AppError::InvalidPeriodFormat(_))),
            "{bad} should be rejected"
        );
    }
}
