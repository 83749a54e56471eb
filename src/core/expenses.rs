use crate::core::totals::{MonthlyTotals, monthly_totals};
use crate::db::expenses::{delete_expense, insert_expense, load_expenses};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::expense::{Expense, ExpenseCategory};
use crate::models::period::Period;
use crate::utils::round2;

pub struct ExpenseLogic;

impl ExpenseLogic {
    pub fn add(pool: &mut DbPool, expense: &Expense) -> AppResult<i64> {
        if expense.concept.is_empty() {
            return Err(AppError::InvalidInput("expense concept is empty".into()));
        }
        if !(expense.cost > 0.0) {
            return Err(AppError::InvalidInput(
                "expense cost must be greater than zero".into(),
            ));
        }

        let id = insert_expense(&pool.conn, expense)?;
        write_log(
            &pool.conn,
            "add",
            &format!("expense #{id}"),
            &format!(
                "{} ({}, {}) {:.2}",
                expense.concept,
                expense.category.to_db_str(),
                expense.kind.to_db_str(),
                expense.cost
            ),
        )?;
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        if !delete_expense(&pool.conn, id)? {
            return Err(AppError::NotFound("Expense", id));
        }
        write_log(&pool.conn, "del", &format!("expense #{id}"), "Expense deleted")?;
        Ok(())
    }

    pub fn list(pool: &DbPool, period: Option<Period>) -> AppResult<Vec<Expense>> {
        load_expenses(&pool.conn, period.map(|p| (p.first_day(), p.last_day())))
    }
}

pub fn expense_totals(expenses: &[Expense], period: Period) -> MonthlyTotals {
    monthly_totals(expenses, period, |e| e.date, |e| e.cost)
}

/// Fixed-kind expenses of the period, summed per category (categories
/// without expenses are left out).
pub fn fixed_by_category(expenses: &[Expense], period: Period) -> Vec<(ExpenseCategory, f64)> {
    let mut out: Vec<(ExpenseCategory, f64)> = Vec::new();
    for e in expenses
        .iter()
        .filter(|e| e.is_fixed() && period.contains(e.date))
    {
        match out.iter_mut().find(|(c, _)| *c == e.category) {
            Some((_, v)) => *v += e.cost,
            None => out.push((e.category, e.cost)),
        }
    }
    out.sort_by_key(|(c, _)| *c);
    out.into_iter().map(|(c, v)| (c, round2(v))).collect()
}
