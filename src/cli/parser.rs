use crate::core::comparator::ComparePolicy;
use crate::export::{ExportFormat, ExportTable};
use crate::models::expense::{CostKind, ExpenseCategory};
use crate::models::purchase::Family;
use crate::models::waste::{Unit, WasteReason};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for oyken
#[derive(Parser)]
#[command(
    name = "oyken",
    version = env!("CARGO_PKG_VERSION"),
    about = "Restaurant operations ledger: daily sales, purchases, expenses, payroll and period reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the copy into a .zip archive")]
        compress: bool,
    },

    /// Daily sales: entry, dashboard, monthly close and trends
    #[command(subcommand)]
    Sales(SalesCmd),

    /// Purchase register
    #[command(subcommand)]
    Purchase(PurchaseCmd),

    /// Supplier master
    #[command(subcommand)]
    Supplier(SupplierCmd),

    /// Operating expenses
    #[command(subcommand)]
    Expense(ExpenseCmd),

    /// Payroll structure and employer cost
    #[command(subcommand)]
    Payroll(PayrollCmd),

    /// Waste register (physical units)
    #[command(subcommand)]
    Waste(WasteCmd),

    /// Valued stock counts
    #[command(subcommand)]
    Inventory(InventoryCmd),

    /// Income statement, breakeven, EBITDA and operating totals
    #[command(subcommand)]
    Report(ReportCmd),

    /// Import data from external files
    #[command(subcommand)]
    Import(ImportCmd),

    /// Export a register to CSV or JSON
    Export {
        #[arg(long, value_enum)]
        table: ExportTable,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Absolute path of the output file
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            help = "YYYY, YYYY-MM, YYYY-MM-DD, a range A:B of the same format, or 'all'"
        )]
        range: Option<String>,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },
}

/// Per-shift values of a day's entry.
#[derive(Args, Debug, Clone, Default)]
pub struct DayEntry {
    #[arg(long = "morning", default_value_t = 0.0, help = "Morning sales")]
    pub sales_morning: f64,
    #[arg(long = "afternoon", default_value_t = 0.0, help = "Afternoon sales")]
    pub sales_afternoon: f64,
    #[arg(long = "night", default_value_t = 0.0, help = "Night sales")]
    pub sales_night: f64,

    #[arg(long, default_value_t = 0)]
    pub diners_morning: u32,
    #[arg(long, default_value_t = 0)]
    pub diners_afternoon: u32,
    #[arg(long, default_value_t = 0)]
    pub diners_night: u32,

    #[arg(long, default_value_t = 0)]
    pub tickets_morning: u32,
    #[arg(long, default_value_t = 0)]
    pub tickets_afternoon: u32,
    #[arg(long, default_value_t = 0)]
    pub tickets_night: u32,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Subcommand)]
pub enum SalesCmd {
    /// Record (or overwrite) a day's sales
    Add {
        /// Date of the day (YYYY-MM-DD)
        date: String,

        #[command(flatten)]
        entry: DayEntry,
    },

    /// Delete a day's sales
    Del { date: String },

    /// Compare a day with its comparable day last year
    Today {
        #[arg(long, help = "Day to analyse (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(long, value_enum, help = "Comparable-day policy (default from config)")]
        policy: Option<ComparePolicy>,
    },

    /// Day-by-day log of a month
    Month {
        #[arg(long, help = "YYYY-MM (default: current month)")]
        period: Option<String>,
    },

    /// Monthly sales close
    Close {
        #[arg(long, help = "YYYY-MM (default: current month)")]
        period: Option<String>,
    },

    /// Direction, consistency and weekly rhythm
    Trends {
        #[arg(long, help = "Anchor day (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// Customer behaviour during the anchor's ISO week
    Behaviour {
        #[arg(long, help = "Anchor day (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PurchaseCmd {
    Add {
        date: String,
        #[arg(long)]
        supplier: String,
        #[arg(long, value_enum)]
        family: Family,
        #[arg(long)]
        cost: f64,
    },
    Del {
        id: i64,
    },
    List {
        #[arg(long, short, help = "YYYY or YYYY-MM")]
        period: Option<String>,
    },
    /// Purchases per month
    Monthly {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum SupplierCmd {
    Add { name: String },
    List,
}

#[derive(Subcommand)]
pub enum ExpenseCmd {
    Add {
        date: String,
        #[arg(long)]
        concept: String,
        #[arg(long, value_enum)]
        category: ExpenseCategory,
        #[arg(long, value_enum, default_value = "fixed")]
        kind: CostKind,
        #[arg(long)]
        cost: f64,
    },
    Del {
        id: i64,
    },
    List {
        #[arg(long, short, help = "YYYY or YYYY-MM")]
        period: Option<String>,
    },
    /// Expenses per month
    Monthly {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum PayrollCmd {
    /// Add a position for a year
    Add {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        name: String,
        #[arg(long, help = "Gross annual salary per person")]
        gross: f64,
        #[arg(
            long,
            help = "12 comma-separated monthly headcounts (a single value fills every month)"
        )]
        headcount: String,
    },
    Del {
        id: i64,
    },
    List {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Monthly payroll, social security and employer cost
    Monthly {
        #[arg(long)]
        year: i32,
        #[arg(long = "no-ss", help = "Leave employer social security out")]
        no_ss: bool,
    },
}

#[derive(Subcommand)]
pub enum WasteCmd {
    Add {
        date: String,
        #[arg(long, value_enum)]
        family: Family,
        #[arg(long)]
        product: String,
        #[arg(long, value_enum)]
        unit: Unit,
        #[arg(long)]
        quantity: f64,
        #[arg(long, value_enum)]
        reason: WasteReason,
    },
    List {
        #[arg(long, short, help = "YYYY or YYYY-MM")]
        period: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum InventoryCmd {
    /// Record the valued stock count of a day
    Set {
        date: String,
        #[arg(long)]
        value: f64,
    },
    List,
}

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Income statement
    Pnl {
        #[arg(long, help = "YYYY or YYYY-MM")]
        period: String,
    },
    /// Breakeven revenue against fixed costs
    Breakeven {
        #[arg(long, help = "YYYY or YYYY-MM")]
        period: String,
    },
    /// EBITDA month by month
    Ebitda {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Sales, purchases, expenses and payroll per month
    Totals {
        #[arg(long)]
        year: i32,
    },
}

#[derive(Subcommand)]
pub enum ImportCmd {
    /// Import daily sales from CSV (current or legacy headers)
    Sales {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}
