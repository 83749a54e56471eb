mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
pub mod range;

pub use logic::ExportLogic;
pub use model::PositionExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, rows: usize, path: &Path) {
    success(format!(
        "{label} export completed ({rows} rows): {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Register to export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTable {
    Sales,
    Purchases,
    Expenses,
    Waste,
    Payroll,
}

impl ExportTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTable::Sales => "sales",
            ExportTable::Purchases => "purchases",
            ExportTable::Expenses => "expenses",
            ExportTable::Waste => "waste",
            ExportTable::Payroll => "payroll",
        }
    }
}
