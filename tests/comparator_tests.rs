use oyken::core::comparator::{
    ComparePolicy, NO_COMPARABLE, Signal, classify, find_comparable, find_today,
    iso_week_match, nearest_weekday_match, resolve, variance,
};
use oyken::core::sales::today_report;
use oyken::errors::AppError;
use oyken::models::daily_record::{DailyRecord, Measure, Shift, ShiftValues};
use oyken::models::ledger::Ledger;

mod common;
use common::{approx, d, day, shifts};

#[test]
fn find_today_returns_stored_record_or_zero() {
    let ledger = Ledger::from_records(vec![
        day("2025-06-13", 900.0, 40, 30),
        day("2025-06-14", 1000.0, 50, 35),
    ]);

    let found = find_today(ledger.records(), d("2025-06-14"));
    assert_eq!(&found, ledger.get(d("2025-06-14")).expect("stored"));

    let missing = find_today(ledger.records(), d("2025-06-15"));
    assert_eq!(missing, DailyRecord::zero(d("2025-06-15")));
    assert!(missing.is_zero());
}

#[test]
fn measures_and_years_of_the_ledger() {
    let rec = DailyRecord::new(
        d("2025-06-14"),
        ShiftValues::new(300.0, 0.0, 500.0),
        ShiftValues::new(20, 0, 30),
        ShiftValues::new(10, 0, 25),
        "",
    );
    assert_eq!(rec.measure(Measure::Sales(None)), 800.0);
    assert_eq!(rec.measure(Measure::Diners(Some(Shift::Night))), 30.0);
    assert_eq!(rec.measure(Measure::Tickets(None)), 35.0);
    assert!(approx(rec.measure(Measure::AverageTicket(Some(Shift::Morning))), 30.0));
    assert_eq!(rec.measure(Measure::AverageTicket(Some(Shift::Afternoon))), 0.0);

    let ledger = Ledger::from_records(vec![
        day("2025-01-02", 1.0, 1, 1),
        day("2023-12-31", 1.0, 1, 1),
        day("2024-06-14", 1.0, 1, 1),
        day("2024-06-15", 1.0, 1, 1),
    ]);
    assert_eq!(ledger.years(), vec![2023, 2024, 2025]);
    assert!(Ledger::new().years().is_empty());
}

#[test]
fn variance_against_itself_is_zero() {
    for x in [0.0, 1.0, 123.45, -50.0, 1e9] {
        let v = variance(x, x);
        assert_eq!(v.delta, 0.0);
        assert_eq!(v.pct, 0.0);
    }
}

#[test]
fn variance_with_non_positive_baseline_has_zero_pct() {
    for current in [0.0, 10.0, -10.0, 5000.0] {
        assert_eq!(variance(current, 0.0).pct, 0.0);
        assert_eq!(variance(current, -100.0).pct, 0.0);
    }
    assert_eq!(variance(300.0, 0.0).delta, 300.0);
}

#[test]
fn classify_bands_are_contiguous() {
    assert_eq!(classify(30.0), Signal::StrongUp);
    assert_eq!(classify(29.999), Signal::Up);
    assert_eq!(classify(1.0), Signal::Up);
    assert_eq!(classify(0.999), Signal::Flat);
    assert_eq!(classify(0.0), Signal::Flat);
    assert_eq!(classify(-0.999), Signal::Flat);
    assert_eq!(classify(-1.0), Signal::Down);
    assert_eq!(classify(-29.999), Signal::Down);
    assert_eq!(classify(-30.0), Signal::StrongDown);
    assert_eq!(classify(-1000.0), Signal::StrongDown);
    assert_eq!(classify(f64::NAN), Signal::Flat);
}

#[test]
fn policies_diverge_at_year_boundary() {
    // 2026-01-02 is a Friday in ISO week 2026-W01
    let ledger = Ledger::from_records(vec![day("2025-01-10", 700.0, 30, 20)]);
    let anchor = d("2026-01-02");

    let a = nearest_weekday_match(ledger.records(), anchor).map(|r| r.date);
    let b = iso_week_match(ledger.records(), anchor)
        .expect("no duplicates")
        .map(|r| r.date);

    assert_eq!(a, Some(d("2025-01-10")));
    assert_eq!(b, None);
    assert_ne!(a, b);
}

#[test]
fn policies_pick_different_records_when_both_exist() {
    // 2025-12-31 belongs to ISO week 2026-W01
    let ledger = Ledger::from_records(vec![
        day("2024-12-25", 500.0, 20, 15),
        day("2025-01-01", 300.0, 10, 8),
    ]);
    let anchor = d("2025-12-31");

    let a = nearest_weekday_match(ledger.records(), anchor).map(|r| r.date);
    let b = iso_week_match(ledger.records(), anchor)
        .expect("no duplicates")
        .map(|r| r.date);

    assert_eq!(a, Some(d("2024-12-25")));
    assert_eq!(b, Some(d("2025-01-01")));
}

#[test]
fn nearest_weekday_and_iso_week_mid_year() {
    // Monday 2021-06-14: anniversary falls on a Sunday
    let ledger = Ledger::from_records(vec![
        day("2020-06-08", 100.0, 5, 5),
        day("2020-06-15", 200.0, 5, 5),
    ]);
    let anchor = d("2021-06-14");

    let a = nearest_weekday_match(ledger.records(), anchor).map(|r| r.date);
    let b = iso_week_match(ledger.records(), anchor)
        .expect("no duplicates")
        .map(|r| r.date);

    assert_eq!(a, Some(d("2020-06-15")));
    assert_eq!(b, Some(d("2020-06-08")));
}

#[test]
fn leap_day_anchor_clamps_to_feb_28() {
    // 2024-02-29 is a Thursday; the anniversary is 2023-02-28 (a Tuesday)
    let ledger = Ledger::from_records(vec![
        day("2023-02-23", 100.0, 5, 5),
        day("2023-03-02", 200.0, 5, 5),
    ]);
    let found = nearest_weekday_match(ledger.records(), d("2024-02-29")).map(|r| r.date);
    assert_eq!(found, Some(d("2023-03-02")));
}

#[test]
fn duplicate_dates_make_iso_week_ambiguous() {
    // a raw slice can violate the one-record-per-date rule; a Ledger cannot
    let raw = vec![day("2024-06-15", 800.0, 40, 30), day("2024-06-15", 810.0, 41, 31)];

    match iso_week_match(&raw, d("2025-06-14")) {
        Err(AppError::AmbiguousMatch { year, week, count, .. }) => {
            assert_eq!(year, 2024);
            assert_eq!(week, 24);
            assert_eq!(count, 2);
        }
        other => panic!("expected AmbiguousMatch, got {other:?}"),
    }

    let ledger = Ledger::from_records(raw);
    assert_eq!(ledger.len(), 1);
    assert!(iso_week_match(ledger.records(), d("2025-06-14")).is_ok());
}

#[test]
fn ledger_upsert_is_last_write_wins() {
    let mut ledger = Ledger::new();
    assert!(ledger.upsert(day("2025-03-02", 100.0, 5, 5)).is_none());
    assert!(ledger.upsert(day("2025-03-01", 50.0, 5, 5)).is_none());

    let replaced = ledger.upsert(day("2025-03-02", 120.0, 6, 6));
    assert_eq!(replaced.map(|r| r.total_sales()), Some(100.0));
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.records()[0].date, d("2025-03-01"));
    assert_eq!(ledger.get(d("2025-03-02")).map(|r| r.total_sales()), Some(120.0));
}

#[test]
fn no_history_gives_zero_baseline_and_label() {
    let ledger = Ledger::from_records(vec![day("2025-06-14", 1000.0, 50, 35)]);
    let (reference, label) =
        find_comparable(ledger.records(), d("2025-06-14"), ComparePolicy::IsoWeek)
            .expect("resolves");
    assert!(reference.is_none());
    assert_eq!(label, NO_COMPARABLE);

    let pair = resolve(ledger.records(), d("2025-06-14"), ComparePolicy::IsoWeek)
        .expect("resolves");
    assert_eq!(pair.baseline().total_sales(), 0.0);
    assert_eq!(pair.baseline().date, d("2024-06-14"));
}

#[test]
fn end_to_end_saturday_comparison() {
    let ledger = Ledger::from_records(vec![
        shifts("2025-06-14", 400.0, 200.0, 400.0),
        shifts("2024-06-15", 300.0, 200.0, 300.0),
    ]);

    for policy in [ComparePolicy::NearestWeekday, ComparePolicy::IsoWeek] {
        let report = today_report(&ledger, d("2025-06-14"), policy).expect("report");
        assert_eq!(
            report.pair.reference.as_ref().map(|r| r.date),
            Some(d("2024-06-15"))
        );

        let total = report.lines.last().expect("total line");
        assert!(total.shift.is_none());
        assert!(approx(total.sales.delta, 200.0));
        assert!(approx(total.sales.pct, 25.0));
        assert_eq!(total.sales.signal(), Signal::Up);

        // morning 400 vs 300, afternoon flat
        assert!(approx(report.lines[0].sales.pct, 100.0 / 3.0));
        assert_eq!(report.lines[0].sales.signal(), Signal::StrongUp);
        assert_eq!(report.lines[1].sales.signal(), Signal::Flat);
    }
}
