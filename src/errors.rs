//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError so that failures are
//! reported the same way whatever layer they come from.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriodFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Ledger / registers
    // ---------------------------
    #[error("No sales record found for date {0}")]
    NoRecordForDate(String),

    #[error("No records found for {0}")]
    NoRecordsInPeriod(String),

    #[error("{0} #{1} not found")]
    NotFound(&'static str, i64),

    #[error("Supplier already exists: {0}")]
    DuplicateSupplier(String),

    #[error("Unknown supplier '{0}'. Register it first with `oyken supplier add`")]
    UnknownSupplier(String),

    // ---------------------------
    // Financial ratios / comparator
    // ---------------------------
    #[error("Undefined ratio for {0}: revenue must be greater than zero")]
    InvalidPeriod(String),

    #[error("Breakeven undefined: gross margin must be greater than zero (got {0:.4})")]
    InvalidMargin(f64),

    #[error("Ambiguous comparable: {count} records share ISO {year}-W{week:02} weekday {weekday}")]
    AmbiguousMatch {
        year: i32,
        week: u32,
        weekday: String,
        count: usize,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::ConfigLoad(e.to_string())
    }
}

impl AppError {
    /// Ratio failures are rendered as warnings by the report commands
    /// instead of aborting the whole invocation.
    pub fn is_ratio_failure(&self) -> bool {
        matches!(self, AppError::InvalidPeriod(_) | AppError::InvalidMargin(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
