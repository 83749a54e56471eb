//! oyken library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Sales(cmd) => commands::sales::handle(cmd, cfg),
        Commands::Purchase(cmd) => commands::purchase::handle(cmd, cfg),
        Commands::Supplier(cmd) => commands::supplier::handle(cmd, cfg),
        Commands::Expense(cmd) => commands::expense::handle(cmd, cfg),
        Commands::Payroll(cmd) => commands::payroll::handle(cmd, cfg),
        Commands::Waste(cmd) => commands::waste::handle(cmd, cfg),
        Commands::Inventory(cmd) => commands::inventory::handle(cmd, cfg),
        Commands::Report(cmd) => commands::report::handle(cmd, cfg),
        Commands::Import(cmd) => commands::import::handle(cmd, cfg),
    }
}

/// Diagnostics go to stderr, filtered by `OYKEN_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("OYKEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    // load the configuration once
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    debug!(database = %cfg.database, test = cli.test, "configuration ready");

    dispatch(&cli, &cfg)
}
