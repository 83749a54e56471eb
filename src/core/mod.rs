pub mod backup;
pub mod comparator;
pub mod expenses;
pub mod import;
pub mod inventory;
pub mod log;
pub mod metrics;
pub mod payroll;
pub mod purchases;
pub mod reports;
pub mod sales;
pub mod totals;
pub mod trends;
pub mod waste;
