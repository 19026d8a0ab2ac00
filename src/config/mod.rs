//! Configuration loading and management for the payroll engine.
//!
//! This module provides the statutory rate tables, the payroll policy
//! constants and the holiday calendar, loaded once from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ph_2025").unwrap();
//! println!("Loaded tables: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionTables, PagIbigTable, PayrollConfig, PayrollPolicy, PhilHealthTable, RateTables,
    SssBracket, TableMetadata, TaxBracket, TaxTable,
};
