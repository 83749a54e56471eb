//! Payroll structure: positions, monthly gross payroll and employer cost.

use crate::db::log::write_log;
use crate::db::payroll::{delete_position, insert_position, load_positions};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::position::Position;
use crate::utils::round2;

pub struct PayrollLogic;

impl PayrollLogic {
    pub fn add(pool: &mut DbPool, position: &Position) -> AppResult<i64> {
        if position.name.is_empty() {
            return Err(AppError::InvalidInput("position name is empty".into()));
        }
        if !(position.gross_annual >= 0.0) {
            return Err(AppError::InvalidInput(
                "gross annual salary cannot be negative".into(),
            ));
        }

        let id = insert_position(&pool.conn, position)?;
        write_log(
            &pool.conn,
            "add",
            &format!("position #{id}"),
            &format!(
                "{} {} gross {:.2} headcount {}",
                position.year,
                position.name,
                position.gross_annual,
                position.headcount_csv()
            ),
        )?;
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        if !delete_position(&pool.conn, id)? {
            return Err(AppError::NotFound("Position", id));
        }
        write_log(&pool.conn, "del", &format!("position #{id}"), "Position deleted")?;
        Ok(())
    }

    pub fn list(pool: &DbPool, year: Option<i32>) -> AppResult<Vec<Position>> {
        load_positions(&pool.conn, year)
    }
}

/// Gross payroll of a position for a month: salary per person / 12 times
/// the people in post.
pub fn monthly_payroll(position: &Position, month: u32) -> f64 {
    round2(position.gross_annual / 12.0 * position.headcount_in(month) as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayrollMonth {
    pub month: u32,
    pub payroll: f64,
    pub social_security: f64,
    pub employer_cost: f64,
}

/// Payroll, employer social security and employer cost for one month of
/// the given year's positions. `ss_rate` of 0 disables social security.
pub fn payroll_month(positions: &[Position], year: i32, month: u32, ss_rate: f64) -> PayrollMonth {
    let mut payroll = 0.0;
    let mut ss = 0.0;

    for p in positions.iter().filter(|p| p.year == year) {
        let gross = monthly_payroll(p, month);
        payroll += gross;
        ss += round2(gross * ss_rate);
    }

    let payroll = round2(payroll);
    let social_security = round2(ss);

    PayrollMonth {
        month,
        payroll,
        social_security,
        employer_cost: round2(payroll + social_security),
    }
}

/// Twelve months of payroll for a year.
pub fn payroll_year(positions: &[Position], year: i32, ss_rate: f64) -> Vec<PayrollMonth> {
    (1..=12)
        .map(|m| payroll_month(positions, year, m, ss_rate))
        .collect()
}

/// Employer cost over a set of months of one year.
pub fn employer_cost(positions: &[Position], year: i32, months: &[u32], ss_rate: f64) -> f64 {
    round2(
        months
            .iter()
            .map(|m| payroll_month(positions, year, *m, ss_rate).employer_cost)
            .sum(),
    )
}
