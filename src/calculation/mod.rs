//! Calculation logic for the payroll engine.
//!
//! This module contains the computation pipeline: daily attendance
//! reconciliation, working-day counting, period time aggregation, the
//! statutory deduction calculators and the final payroll computation.

mod deductions;
mod payroll;
mod period_time;
mod reconciliation;
mod rounding;
mod working_days;

pub use deductions::{
    calculate_pagibig, calculate_philhealth, calculate_sss, calculate_withholding_tax,
};
pub use payroll::{PayrollCalculation, compute_payroll};
pub use period_time::{PeriodTimeTotals, aggregate_period_time};
pub use reconciliation::{DailyAttendance, reconcile_day};
pub use rounding::{round_currency, round_hours, round_tax};
pub use working_days::{count_working_days, is_weekend, is_working_day};
