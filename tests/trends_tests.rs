use chrono::{Duration, Weekday};
use oyken::core::sales::{month_close, month_log};
use oyken::core::trends::{
    Alert, behaviour, coefficient_of_variation, moving_average_direction, trend_report,
    weekly_totals,
};
use oyken::errors::AppError;
use oyken::models::daily_record::{DailyRecord, Shift, ShiftValues};
use oyken::models::ledger::Ledger;

mod common;
use common::{approx, d, day};

/// Two weeks starting Monday 2025-03-03: 100 a day, then 200 a day.
fn two_weeks() -> Vec<DailyRecord> {
    let start = d("2025-03-03");
    (0..14)
        .map(|i| {
            let date = start + Duration::days(i);
            let sales = if i < 7 { 100.0 } else { 200.0 };
            DailyRecord::new(
                date,
                ShiftValues::new(sales, 0.0, 0.0),
                ShiftValues::new(10, 0, 0),
                ShiftValues::new(10, 0, 0),
                "",
            )
        })
        .collect()
}

#[test]
fn moving_average_compares_consecutive_windows() {
    let records = two_weeks();
    let (ma, direction) = moving_average_direction(&records, 7);
    assert_eq!(ma, Some(200.0));
    assert!(approx(direction.pct, 100.0));

    let (ma, direction) = moving_average_direction(&records[..3], 7);
    assert_eq!(ma, None);
    assert_eq!(direction.pct, 0.0);
}

#[test]
fn weekly_consistency() {
    let weeks = weekly_totals(&two_weeks());
    assert_eq!(weeks, vec![((2025, 10), 700.0), ((2025, 11), 1400.0)]);

    let cv = coefficient_of_variation(&[700.0, 1400.0]);
    assert!((cv - 47.14).abs() < 0.01);
    assert_eq!(coefficient_of_variation(&[500.0]), 0.0);
    assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 0.0);
}

#[test]
fn trend_report_flags_variability_and_ties_to_monday() {
    let report = trend_report(&two_weeks(), d("2025-03-16")).expect("history");

    assert_eq!(report.moving_average, Some(200.0));
    assert!(report.alerts.contains(&Alert::HighWeeklyVariability));
    assert!(!report.alerts.contains(&Alert::SingleDayDependency));

    assert_eq!(report.weekday_shares.len(), 7);
    assert_eq!(report.weekday_shares[0].weekday, Weekday::Mon);
    assert!(approx(report.weekday_shares[6].pct, 100.0 / 7.0));
    assert_eq!(report.strong_day.map(|s| s.weekday), Some(Weekday::Mon));
    assert_eq!(report.weak_day.map(|s| s.weekday), Some(Weekday::Mon));
    assert_eq!(report.tickets_per_diner_delta, 0.0);
}

#[test]
fn trend_report_ignores_days_after_anchor() {
    let report = trend_report(&two_weeks(), d("2025-03-09")).expect("history");
    assert_eq!(report.moving_average, Some(100.0));
    assert_eq!(report.weekly_totals.len(), 1);
    assert_eq!(report.weekly_cv, 0.0);
}

#[test]
fn single_day_dependency_and_shared_consumption() {
    // Saturday carries the week; tickets per diner fall from 1.5 to 1.2
    let start = d("2025-03-03");
    let mut records: Vec<DailyRecord> = (0..7)
        .map(|i| {
            let date = start + Duration::days(i);
            let sales = if i == 5 { 700.0 } else { 100.0 };
            DailyRecord::new(
                date,
                ShiftValues::new(sales, 0.0, 0.0),
                ShiftValues::new(10, 0, 0),
                ShiftValues::new(15, 0, 0),
                "",
            )
        })
        .collect();
    records.push(day("2025-03-10", 100.0, 10, 12));

    let report = trend_report(&records, d("2025-03-09")).expect("history");
    assert_eq!(report.strong_day.as_ref().map(|s| s.weekday), Some(Weekday::Sat));
    assert!(report.alerts.contains(&Alert::SingleDayDependency));

    let report = trend_report(&records, d("2025-03-10")).expect("history");
    assert!(approx(report.tickets_per_diner, 1.2));
    assert!(approx(report.tickets_per_diner_delta, -0.3));
    assert!(report.alerts.contains(&Alert::SharedConsumptionRising));
}

#[test]
fn empty_history_has_no_trends() {
    assert!(matches!(
        trend_report(&[], d("2025-03-10")),
        Err(AppError::NoRecordsInPeriod(_))
    ));
}

#[test]
fn behaviour_of_the_anchor_week() {
    let records = vec![
        DailyRecord::new(
            d("2025-03-12"),
            ShiftValues::new(100.0, 300.0, 100.0),
            ShiftValues::new(10, 20, 10),
            ShiftValues::new(15, 30, 10),
            "",
        ),
        day("2025-03-20", 999.0, 1, 1),
    ];

    let b = behaviour(&records, d("2025-03-16")).expect("week has data");
    assert_eq!(b.first_day, d("2025-03-12"));
    assert_eq!(b.last_day, d("2025-03-12"));
    assert_eq!(b.sales, 500.0);
    assert_eq!(b.diners, 40);
    assert_eq!(b.tickets, 55);
    assert!(approx(b.tickets_per_diner, 1.375));
    assert!(approx(b.sales_per_diner, 12.5));

    let afternoon = b
        .shifts
        .iter()
        .find(|s| s.shift == Shift::Afternoon)
        .expect("afternoon");
    assert!(approx(afternoon.share_pct, 60.0));
    assert!(approx(afternoon.sales_per_diner, 15.0));
    assert!(b.readings.contains(&"The afternoon drives the week"));
    assert!(b.readings.contains(&"Good conversion per customer"));

    assert!(matches!(
        behaviour(&records, d("2025-03-03")),
        Err(AppError::NoRecordsInPeriod(_))
    ));
}

#[test]
fn month_log_and_close() {
    let ledger = Ledger::from_records(two_weeks());

    let rows = month_log(&ledger, 2025, 3).expect("march has data");
    assert_eq!(rows.len(), 14);
    assert!(matches!(
        month_log(&ledger, 2025, 4),
        Err(AppError::NoRecordsInPeriod(_))
    ));

    let close = month_close(&ledger, 2025, 3).expect("valid month");
    assert_eq!(close.sales_total, 2100.0);
    assert_eq!(close.days_operated, 14);
    assert_eq!(close.tickets, 140);
    assert!(approx(close.average_ticket, 15.0));

    let empty = month_close(&ledger, 2025, 4).expect("valid month");
    assert_eq!(empty.days_operated, 0);
    assert_eq!(empty.average_ticket, 0.0);
    assert!(month_close(&ledger, 2025, 13).is_err());
}
