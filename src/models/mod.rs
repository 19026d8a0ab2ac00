//! Core data models for the payroll engine.
//!
//! This module contains the domain records the engine consumes (employees,
//! clock events, leave, holidays) and produces (payslips and payroll runs).

mod attendance;
mod employee;
mod holiday;
mod leave;
mod pay_period;
mod payslip;

pub use attendance::{AttendanceEvent, AttendanceKind};
pub use employee::{Employee, EmploymentStatus, Schedule};
pub use holiday::{Holiday, HolidayCalendar, HolidayType};
pub use leave::{LeaveBalance, LeaveRequest, LeaveStatus};
pub use pay_period::PayPeriod;
pub use payslip::{AuditStep, PayBreakdown, PayrollRun, Payslip, RunStatus};
