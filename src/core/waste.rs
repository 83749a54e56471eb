use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::waste::{insert_waste, load_waste};
use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::models::waste::{Unit, WasteEntry};
use crate::utils::round2;
use std::collections::BTreeMap;

pub struct WasteLogic;

impl WasteLogic {
    pub fn add(pool: &mut DbPool, entry: &WasteEntry) -> AppResult<i64> {
        if entry.product.is_empty() {
            return Err(AppError::InvalidInput("waste product is empty".into()));
        }
        if !(entry.quantity > 0.0) {
            return Err(AppError::InvalidInput(
                "waste quantity must be greater than zero".into(),
            ));
        }

        let id = insert_waste(&pool.conn, entry)?;
        write_log(
            &pool.conn,
            "add",
            &format!("waste #{id}"),
            &format!(
                "{} {} {} ({})",
                entry.product,
                entry.quantity,
                entry.unit.to_db_str(),
                entry.reason.to_db_str()
            ),
        )?;
        Ok(id)
    }

    pub fn list(pool: &DbPool, period: Option<Period>) -> AppResult<Vec<WasteEntry>> {
        load_waste(&pool.conn, period.map(|p| (p.first_day(), p.last_day())))
    }
}

/// Quantities per unit. Waste carries no monetary value, so kilograms,
/// litres and units are never added together.
pub fn totals_by_unit(entries: &[WasteEntry]) -> BTreeMap<Unit, f64> {
    let mut out = BTreeMap::new();
    for e in entries {
        *out.entry(e.unit).or_insert(0.0) += e.quantity;
    }
    out.into_iter().map(|(u, q)| (u, round2(q))).collect()
}
