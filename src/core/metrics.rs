//! Period-level financial ratios over totals already summed by the caller.

use crate::errors::{AppError, AppResult};

/// Gross margin as a fraction of sales: `1 - cogs / sales`.
///
/// Undefined without revenue; `period` names the period in the error.
pub fn gross_margin_pct_for(sales: f64, cost_of_goods: f64, period: &str) -> AppResult<f64> {
    if sales > 0.0 {
        Ok(1.0 - cost_of_goods / sales)
    } else {
        Err(AppError::InvalidPeriod(period.to_string()))
    }
}

pub fn gross_margin_pct(sales: f64, cost_of_goods: f64) -> AppResult<f64> {
    gross_margin_pct_for(sales, cost_of_goods, "the selected period")
}

/// Revenue at which the gross margin covers the fixed costs.
pub fn breakeven_revenue(fixed_costs: f64, margin_pct: f64) -> AppResult<f64> {
    if margin_pct > 0.0 {
        Ok(fixed_costs / margin_pct)
    } else {
        Err(AppError::InvalidMargin(margin_pct))
    }
}

/// Gross margin minus personnel and operating expenses.
pub fn ebitda(gross_margin_amount: f64, personnel_cost: f64, operating_expenses: f64) -> f64 {
    gross_margin_amount - personnel_cost - operating_expenses
}
