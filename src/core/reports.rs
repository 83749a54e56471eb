//! Period reports built on top of the derived metrics.
//!
//! Every builder works on a [`YearData`] snapshot, loaded once per command,
//! and never touches the database itself.

use crate::core::expenses::{expense_totals, fixed_by_category};
use crate::core::metrics::{breakeven_revenue, ebitda, gross_margin_pct_for};
use crate::core::payroll::employer_cost;
use crate::core::purchases::purchase_totals;
use crate::core::totals::monthly_totals;
use crate::db::expenses::load_expenses;
use crate::db::inventory::load_counts;
use crate::db::payroll::load_positions;
use crate::db::pool::DbPool;
use crate::db::purchases::load_purchases;
use crate::db::sales::load_ledger;
use crate::db::waste::load_waste;
use crate::errors::AppResult;
use crate::models::daily_record::ratio;
use crate::models::expense::{Expense, ExpenseCategory};
use crate::models::inventory::{InventoryCount, closing_value, opening_value};
use crate::models::ledger::Ledger;
use crate::models::period::Period;
use crate::models::position::Position;
use crate::models::purchase::Purchase;
use crate::models::waste::WasteEntry;
use crate::utils::round2;
use tracing::debug;

/// Everything recorded for one calendar year.
#[derive(Debug, Clone, Default)]
pub struct YearData {
    pub year: i32,
    pub ledger: Ledger,
    pub purchases: Vec<Purchase>,
    pub expenses: Vec<Expense>,
    pub positions: Vec<Position>,
    pub waste: Vec<WasteEntry>,
    /// All counts, whatever the year: the opening stock may predate it.
    pub inventory: Vec<InventoryCount>,
    pub ss_rate: f64,
}

impl YearData {
    pub fn load(pool: &DbPool, year: i32, ss_rate: f64) -> AppResult<Self> {
        let p = Period::year(year);
        let bounds = Some((p.first_day(), p.last_day()));

        let data = Self {
            year,
            ledger: load_ledger(&pool.conn, bounds)?,
            purchases: load_purchases(&pool.conn, bounds)?,
            expenses: load_expenses(&pool.conn, bounds)?,
            positions: load_positions(&pool.conn, Some(year))?,
            waste: load_waste(&pool.conn, bounds)?,
            inventory: load_counts(&pool.conn)?,
            ss_rate,
        };

        debug!(
            year,
            days = data.ledger.len(),
            purchases = data.purchases.len(),
            expenses = data.expenses.len(),
            positions = data.positions.len(),
            "year data loaded"
        );
        Ok(data)
    }

    pub fn revenue(&self, period: Period) -> f64 {
        round2(
            self.ledger
                .iter()
                .filter(|r| period.contains(r.date))
                .map(|r| r.total_sales())
                .sum(),
        )
    }

    pub fn purchases_total(&self, period: Period) -> f64 {
        purchase_totals(&self.purchases, period).total
    }

    pub fn expenses_total(&self, period: Period) -> f64 {
        expense_totals(&self.expenses, period).total
    }

    pub fn personnel(&self, period: Period) -> f64 {
        employer_cost(&self.positions, period.year, &period.months(), self.ss_rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeStatement {
    pub period: Period,
    pub revenue: f64,
    pub purchases: f64,
    pub opening_inventory: f64,
    pub closing_inventory: f64,
    pub cost_of_sales: f64,
    pub gross_margin: f64,
    pub gross_margin_pct: f64,
    pub personnel: f64,
    pub operating_expenses: f64,
    pub ebitda: f64,
}

impl IncomeStatement {
    pub fn inventory_variation(&self) -> f64 {
        round2(self.closing_inventory - self.opening_inventory)
    }
}

/// Income statement for a year or a month. Fails with `InvalidPeriod` when
/// the period has no revenue.
pub fn income_statement(data: &YearData, period: Period) -> AppResult<IncomeStatement> {
    let revenue = data.revenue(period);
    let purchases = data.purchases_total(period);
    let opening_inventory = opening_value(&data.inventory, period.first_day());
    let closing_inventory = closing_value(&data.inventory, period.last_day());

    let cost_of_sales = round2(purchases + opening_inventory - closing_inventory);
    let gross_margin = round2(revenue - cost_of_sales);
    let gross_margin_pct = gross_margin_pct_for(revenue, cost_of_sales, &period.to_string())?;

    let personnel = data.personnel(period);
    let operating_expenses = data.expenses_total(period);

    Ok(IncomeStatement {
        period,
        revenue,
        purchases,
        opening_inventory,
        closing_inventory,
        cost_of_sales,
        gross_margin,
        gross_margin_pct,
        personnel,
        operating_expenses,
        ebitda: round2(ebitda(gross_margin, personnel, operating_expenses)),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakevenReport {
    pub period: Period,
    pub revenue: f64,
    pub purchases: f64,
    pub margin_pct: f64,
    pub personnel: f64,
    pub fixed_by_category: Vec<(ExpenseCategory, f64)>,
    pub fixed_costs: f64,
    pub breakeven: f64,
    /// Revenue as a percentage of the breakeven revenue.
    pub coverage_pct: f64,
}

impl BreakevenReport {
    /// Revenue still missing to reach breakeven (0 once it is reached).
    pub fn gap(&self) -> f64 {
        round2((self.breakeven - self.revenue).max(0.0))
    }
}

/// Breakeven revenue for a period. Fails with `InvalidPeriod` without
/// revenue and with `InvalidMargin` when purchases eat the whole margin.
pub fn breakeven(data: &YearData, period: Period) -> AppResult<BreakevenReport> {
    let revenue = data.revenue(period);
    let purchases = data.purchases_total(period);
    let margin_pct = gross_margin_pct_for(revenue, purchases, &period.to_string())?;

    let personnel = data.personnel(period);
    let by_category = fixed_by_category(&data.expenses, period);
    let fixed_expenses: f64 = by_category.iter().map(|(_, v)| v).sum();
    let fixed_costs = round2(personnel + fixed_expenses);

    let breakeven = round2(breakeven_revenue(fixed_costs, margin_pct)?);

    Ok(BreakevenReport {
        period,
        revenue,
        purchases,
        margin_pct,
        personnel,
        fixed_by_category: by_category,
        fixed_costs,
        breakeven,
        coverage_pct: ratio(revenue, breakeven) * 100.0,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EbitdaRow {
    pub month: u32,
    pub revenue: f64,
    pub purchases: f64,
    pub cost_of_sales: f64,
    pub personnel: f64,
    pub operating_expenses: f64,
    pub ebitda: f64,
}

/// EBITDA month by month. Months without revenue still get a row: EBITDA
/// is a plain subtraction and is always defined.
pub fn ebitda_table(data: &YearData, period: Period) -> Vec<EbitdaRow> {
    period
        .months()
        .into_iter()
        .filter_map(|m| Period::month(period.year, m).ok())
        .map(|mp| {
            let revenue = data.revenue(mp);
            let purchases = data.purchases_total(mp);
            let cost_of_sales = round2(
                purchases + opening_value(&data.inventory, mp.first_day())
                    - closing_value(&data.inventory, mp.last_day()),
            );
            let personnel = data.personnel(mp);
            let operating_expenses = data.expenses_total(mp);

            EbitdaRow {
                month: mp.month.unwrap_or(1),
                revenue,
                purchases,
                cost_of_sales,
                personnel,
                operating_expenses,
                ebitda: round2(ebitda(revenue - cost_of_sales, personnel, operating_expenses)),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsRow {
    pub month: u32,
    pub sales: f64,
    pub purchases: f64,
    pub expenses: f64,
    pub payroll: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatingTotals {
    pub year: i32,
    pub rows: Vec<TotalsRow>,
    pub total: TotalsRow,
    /// Which registers hold data for the year.
    pub coverage: Vec<(&'static str, bool)>,
}

/// Sales, purchases, expenses and payroll per month of a year.
pub fn operating_totals(data: &YearData) -> OperatingTotals {
    let period = Period::year(data.year);

    let sales = monthly_totals(data.ledger.records(), period, |r| r.date, |r| r.total_sales());
    let purchases = purchase_totals(&data.purchases, period);
    let expenses = expense_totals(&data.expenses, period);

    let rows: Vec<TotalsRow> = (1..=12)
        .map(|m| TotalsRow {
            month: m,
            sales: sales.month(m),
            purchases: purchases.month(m),
            expenses: expenses.month(m),
            payroll: employer_cost(&data.positions, data.year, &[m], data.ss_rate),
        })
        .collect();

    let total = TotalsRow {
        month: 0,
        sales: sales.total,
        purchases: purchases.total,
        expenses: expenses.total,
        payroll: round2(rows.iter().map(|r| r.payroll).sum()),
    };

    let has_inventory = data
        .inventory
        .iter()
        .any(|c| period.contains(c.date));

    let coverage = vec![
        ("sales", !data.ledger.is_empty()),
        ("purchases", !data.purchases.is_empty()),
        ("expenses", !data.expenses.is_empty()),
        ("payroll", !data.positions.is_empty()),
        ("waste", !data.waste.is_empty()),
        ("inventory", has_inventory),
    ];

    OperatingTotals {
        year: data.year,
        rows,
        total,
        coverage,
    }
}
