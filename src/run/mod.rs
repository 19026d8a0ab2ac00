//! Payroll run orchestration and storage.
//!
//! This module holds the [`PayrollRunStore`] that keeps runs and their
//! payslips consistent, and [`run_payroll`], which processes one pay period
//! for a set of employees.

mod processor;
mod store;

pub use processor::{PayrollInputs, RunSummary, SkippedEmployee, run_payroll};
pub use store::PayrollRunStore;
