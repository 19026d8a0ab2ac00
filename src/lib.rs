//! Attendance-driven payroll engine
//!
//! This crate turns raw clock-in/clock-out events, approved leave and a holiday
//! calendar into payslips with statutory deductions, and keeps each employee's
//! leave balances consistent with their leave request history.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//! use payroll_engine::models::PayPeriod;
//! use payroll_engine::run::{run_payroll, PayrollInputs, PayrollRunStore};
//! use chrono::NaiveDate;
//!
//! let loader = ConfigLoader::load("./config/ph_2025")?;
//! let inputs = PayrollInputs {
//!     employees: &[],
//!     attendance: &[],
//!     leave_requests: &[],
//!     holidays: loader.holidays(),
//! };
//! let period = PayPeriod::new(
//!     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
//! )?;
//!
//! let mut store = PayrollRunStore::new();
//! let pay_date = NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
//! let summary = run_payroll(&mut store, &inputs, period, pay_date, loader.config())?;
//! println!("Net pay for the run: {}", summary.run.total_net_pay);
//! # Ok::<(), payroll_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod leave;
pub mod models;
pub mod run;
