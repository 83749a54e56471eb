use crate::db::inventory::{load_counts, upsert_count};
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::inventory::InventoryCount;

pub struct InventoryLogic;

impl InventoryLogic {
    /// Store the valued count for a day, replacing any earlier count.
    pub fn set(pool: &mut DbPool, count: InventoryCount) -> AppResult<()> {
        if !(count.value >= 0.0) {
            return Err(AppError::InvalidInput(
                "inventory value cannot be negative".into(),
            ));
        }
        upsert_count(&pool.conn, &count)?;
        write_log(
            &pool.conn,
            "edit",
            &format!("inventory {}", count.date),
            &format!("{:.2}", count.value),
        )?;
        Ok(())
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<InventoryCount>> {
        load_counts(&pool.conn)
    }
}
