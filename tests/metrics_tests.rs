use oyken::core::metrics::{breakeven_revenue, ebitda, gross_margin_pct};
use oyken::core::payroll::{employer_cost, monthly_payroll, payroll_month, payroll_year};
use oyken::core::reports::{
    YearData, breakeven, ebitda_table, income_statement, operating_totals,
};
use oyken::errors::AppError;
use oyken::models::expense::{CostKind, Expense, ExpenseCategory};
use oyken::models::inventory::InventoryCount;
use oyken::models::ledger::Ledger;
use oyken::models::period::Period;
use oyken::models::position::{Position, parse_headcount};
use oyken::models::purchase::{Family, Purchase};

mod common;
use common::{approx, d, day};

#[test]
fn gross_margin_requires_revenue() {
    assert!(approx(gross_margin_pct(1000.0, 300.0).expect("defined"), 0.70));
    assert!(matches!(
        gross_margin_pct(0.0, 300.0),
        Err(AppError::InvalidPeriod(_))
    ));
    assert!(matches!(
        gross_margin_pct(-5.0, 300.0),
        Err(AppError::InvalidPeriod(_))
    ));
}

#[test]
fn breakeven_requires_positive_margin() {
    assert!(approx(breakeven_revenue(5000.0, 0.25).expect("defined"), 20000.0));
    assert!(matches!(
        breakeven_revenue(5000.0, 0.0),
        Err(AppError::InvalidMargin(_))
    ));
    assert!(matches!(
        breakeven_revenue(5000.0, -0.1),
        Err(AppError::InvalidMargin(_))
    ));
}

#[test]
fn ebitda_is_plain_subtraction() {
    assert_eq!(ebitda(700.0, 300.0, 200.0), 200.0);
    assert_eq!(ebitda(100.0, 300.0, 200.0), -400.0);
}

#[test]
fn ratio_failures_are_flagged() {
    assert!(AppError::InvalidPeriod("x".into()).is_ratio_failure());
    assert!(AppError::InvalidMargin(0.0).is_ratio_failure());
    assert!(!AppError::InvalidInput("x".into()).is_ratio_failure());
}

#[test]
fn headcount_accepts_one_or_twelve_values() {
    assert_eq!(parse_headcount("2"), Some([2; 12]));
    let seasonal = parse_headcount("1,1,1,1,1,2,3,3,2,1,1,1").expect("twelve values");
    assert_eq!(seasonal[6], 3);
    assert_eq!(parse_headcount("1,2,3"), None);
    assert_eq!(parse_headcount("two"), None);
}

#[test]
fn payroll_per_month_and_social_security() {
    let mut hc = [1u32; 12];
    hc[7] = 0; // closed in August
    let cook = Position::new(2025, "Cook", 24000.0, hc);
    let waiter = Position::new(2025, "Waiter", 18000.0, [2; 12]);
    let other_year = Position::new(2024, "Cook", 99999.0, [5; 12]);
    let positions = vec![cook.clone(), waiter, other_year];

    assert_eq!(monthly_payroll(&cook, 1), 2000.0);
    assert_eq!(monthly_payroll(&cook, 8), 0.0);

    let jan = payroll_month(&positions, 2025, 1, 0.33);
    assert_eq!(jan.payroll, 5000.0);
    assert_eq!(jan.social_security, 1650.0);
    assert_eq!(jan.employer_cost, 6650.0);

    let aug = payroll_month(&positions, 2025, 8, 0.0);
    assert_eq!(aug.payroll, 3000.0);
    assert_eq!(aug.social_security, 0.0);

    let year = payroll_year(&positions, 2025, 0.33);
    assert_eq!(year.len(), 12);
    assert_eq!(employer_cost(&positions, 2025, &[1, 2], 0.33), 13300.0);
}

/// January 2025: 10k revenue, 3k purchases, stock 1000 -> 1500,
/// one 24k position, 1000 rent (fixed) and 500 marketing (variable).
fn january() -> YearData {
    YearData {
        year: 2025,
        ledger: Ledger::from_records(vec![
            day("2025-01-10", 6000.0, 200, 150),
            day("2025-01-20", 4000.0, 150, 100),
        ]),
        purchases: vec![
            Purchase::new(d("2025-01-05"), "Makro", Family::RawMaterial, 2000.0),
            Purchase::new(d("2025-01-15"), "Makro", Family::Beverages, 1000.0),
        ],
        expenses: vec![
            Expense::new(d("2025-01-01"), "Rent", ExpenseCategory::Rent, CostKind::Fixed, 1000.0),
            Expense::new(
                d("2025-01-12"),
                "Flyers",
                ExpenseCategory::Marketing,
                CostKind::Variable,
                500.0,
            ),
        ],
        positions: vec![Position::new(2025, "Cook", 24000.0, [1; 12])],
        waste: Vec::new(),
        inventory: vec![
            InventoryCount { date: d("2024-12-31"), value: 1000.0 },
            InventoryCount { date: d("2025-01-31"), value: 1500.0 },
        ],
        ss_rate: 0.0,
    }
}

#[test]
fn income_statement_for_a_month() {
    let data = january();
    let s = income_statement(&data, Period::month(2025, 1).expect("month")).expect("revenue");

    assert_eq!(s.revenue, 10000.0);
    assert_eq!(s.purchases, 3000.0);
    assert_eq!(s.opening_inventory, 1000.0);
    assert_eq!(s.closing_inventory, 1500.0);
    assert_eq!(s.inventory_variation(), 500.0);
    assert_eq!(s.cost_of_sales, 2500.0);
    assert_eq!(s.gross_margin, 7500.0);
    assert!(approx(s.gross_margin_pct, 0.75));
    assert_eq!(s.personnel, 2000.0);
    assert_eq!(s.operating_expenses, 1500.0);
    assert_eq!(s.ebitda, 4000.0);
}

#[test]
fn income_statement_without_revenue_is_invalid_period() {
    let data = january();
    let feb = Period::month(2025, 2).expect("month");
    assert!(matches!(
        income_statement(&data, feb),
        Err(AppError::InvalidPeriod(_))
    ));
}

#[test]
fn breakeven_uses_fixed_costs_only() {
    let data = january();
    let b = breakeven(&data, Period::month(2025, 1).expect("month")).expect("defined");

    assert!(approx(b.margin_pct, 0.70));
    assert_eq!(b.fixed_by_category, vec![(ExpenseCategory::Rent, 1000.0)]);
    assert_eq!(b.fixed_costs, 3000.0);
    assert_eq!(b.breakeven, 4285.71);
    assert_eq!(b.gap(), 0.0);
    assert!(b.coverage_pct > 100.0);
}

#[test]
fn breakeven_fails_when_purchases_exceed_revenue() {
    let mut data = january();
    data.purchases
        .push(Purchase::new(d("2025-01-25"), "Makro", Family::Other, 9000.0));

    let err = breakeven(&data, Period::month(2025, 1).expect("month")).unwrap_err();
    assert!(matches!(err, AppError::InvalidMargin(_)));
    assert!(err.is_ratio_failure());
}

#[test]
fn ebitda_table_covers_every_month() {
    let data = january();
    let rows = ebitda_table(&data, Period::year(2025));

    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].month, 1);
    assert_eq!(rows[0].ebitda, 4000.0);

    // February: no revenue, closing stock carries over, payroll still due
    assert_eq!(rows[1].revenue, 0.0);
    assert_eq!(rows[1].cost_of_sales, 0.0);
    assert_eq!(rows[1].ebitda, -2000.0);
}

#[test]
fn operating_totals_report_coverage() {
    let data = january();
    let t = operating_totals(&data);

    assert_eq!(t.rows.len(), 12);
    assert_eq!(t.total.sales, 10000.0);
    assert_eq!(t.total.purchases, 3000.0);
    assert_eq!(t.total.expenses, 1500.0);
    assert_eq!(t.total.payroll, 24000.0);

    let waste = t.coverage.iter().find(|(name, _)| *name == "waste");
    assert_eq!(waste, Some(&("waste", false)));
    let sales = t.coverage.iter().find(|(name, _)| *name == "sales");
    assert_eq!(sales, Some(&("sales", true)));
}
