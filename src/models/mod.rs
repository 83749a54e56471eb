pub mod daily_record;
pub mod expense;
pub mod inventory;
pub mod ledger;
pub mod period;
pub mod position;
pub mod purchase;
pub mod waste;
