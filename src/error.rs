//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine can refuse or report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::LeaveStatus;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table or policy value is unusable.
    #[error("Invalid rate table '{table}': {message}")]
    InvalidRateTable {
        /// The table that failed validation.
        table: String,
        /// What made the table invalid.
        message: String,
    },

    /// An employee record cannot be paid (missing or non-positive salary rate).
    #[error("Invalid employee '{employee_id}': {message}")]
    InvalidEmployee {
        /// The employee identifier.
        employee_id: String,
        /// A description of what made the record unusable.
        message: String,
    },

    /// A work schedule was inconsistent.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// A description of the problem.
        message: String,
    },

    /// A pay period ends before it starts.
    #[error("Invalid pay period: end date {end} is before start date {start}")]
    InvalidPayPeriod {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A leave request was malformed.
    #[error("Invalid leave request: {message}")]
    InvalidLeaveRequest {
        /// A description of the problem.
        message: String,
    },

    /// No leave request exists with the given id.
    #[error("Leave request not found: {id}")]
    LeaveRequestNotFound {
        /// The missing request id.
        id: Uuid,
    },

    /// No balance row exists for the employee and leave type.
    #[error("No {leave_type} leave balance for employee '{employee_id}'")]
    LeaveBalanceNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The leave category.
        leave_type: String,
    },

    /// Approval would take the balance below zero.
    #[error(
        "Insufficient {leave_type} leave for employee '{employee_id}': requested {requested} days, remaining {remaining}"
    )]
    InsufficientLeaveBalance {
        /// The employee identifier.
        employee_id: String,
        /// The leave category.
        leave_type: String,
        /// Working days the request would consume.
        requested: Decimal,
        /// Days left on the balance.
        remaining: Decimal,
    },

    /// The leave request cannot move between these states.
    #[error("Leave request cannot move from {from} to {to}")]
    InvalidLeaveTransition {
        /// The current status.
        from: LeaveStatus,
        /// The requested status.
        to: LeaveStatus,
    },

    /// No payroll run exists with the given id.
    #[error("Payroll run not found: {id}")]
    PayrollRunNotFound {
        /// The missing run id.
        id: Uuid,
    },

    /// The payroll run is already processed and cannot change.
    #[error("Payroll run {id} is already processed and finalized")]
    PayrollRunFinalized {
        /// The finalized run id.
        id: Uuid,
    },

    /// No payslip exists with the given id in the run.
    #[error("Payslip not found: {id}")]
    PayslipNotFound {
        /// The missing payslip id.
        id: Uuid,
    },

    /// The run already holds a payslip for this employee.
    #[error("Payroll run {run_id} already has a payslip for employee '{employee_id}'")]
    DuplicatePayslip {
        /// The run id.
        run_id: Uuid,
        /// The employee identifier.
        employee_id: String,
    },

    /// A payroll run was requested with nobody to pay.
    #[error("No active employees found; payroll run cancelled")]
    NoEligibleEmployees,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
