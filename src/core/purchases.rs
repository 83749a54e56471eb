use crate::core::totals::{MonthlyTotals, monthly_totals};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::purchases::{
    delete_purchase, find_supplier, insert_purchase, insert_supplier, load_purchases,
};
use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::models::purchase::Purchase;

/// Purchase register and supplier master.
pub struct PurchaseLogic;

impl PurchaseLogic {
    /// Register a purchase from a known supplier. The supplier name is
    /// stored with its registered spelling.
    pub fn add(pool: &mut DbPool, purchase: Purchase) -> AppResult<i64> {
        if !(purchase.cost > 0.0) {
            return Err(AppError::InvalidInput(
                "purchase cost must be greater than zero".into(),
            ));
        }

        let supplier = find_supplier(&pool.conn, &purchase.supplier)?
            .ok_or_else(|| AppError::UnknownSupplier(purchase.supplier.clone()))?;

        let purchase = Purchase {
            supplier,
            ..purchase
        };
        let id = insert_purchase(&pool.conn, &purchase)?;

        write_log(
            &pool.conn,
            "add",
            &format!("purchase #{id}"),
            &format!(
                "{} {} {:.2}",
                purchase.supplier,
                purchase.family.to_db_str(),
                purchase.cost
            ),
        )?;
        Ok(id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        if !delete_purchase(&pool.conn, id)? {
            return Err(AppError::NotFound("Purchase", id));
        }
        write_log(&pool.conn, "del", &format!("purchase #{id}"), "Purchase deleted")?;
        Ok(())
    }

    pub fn add_supplier(pool: &mut DbPool, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("supplier name is empty".into()));
        }
        if let Some(existing) = find_supplier(&pool.conn, name)? {
            return Err(AppError::DuplicateSupplier(existing));
        }

        insert_supplier(&pool.conn, name)?;
        write_log(&pool.conn, "add", "supplier", name)?;
        Ok(())
    }

    pub fn list(pool: &DbPool, period: Option<Period>) -> AppResult<Vec<Purchase>> {
        load_purchases(&pool.conn, period.map(|p| (p.first_day(), p.last_day())))
    }
}

pub fn purchase_totals(purchases: &[Purchase], period: Period) -> MonthlyTotals {
    monthly_totals(purchases, period, |p| p.date, |p| p.cost)
}
