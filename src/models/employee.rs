//! Employee model and work schedule.
//!
//! This module defines the [`Employee`] record consumed by a payroll run and
//! the per-employee [`Schedule`] used by attendance reconciliation.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed; eligible for payroll runs.
    Active,
    /// Employment ended by the employer.
    Terminated,
    /// Employment ended by the employee.
    Resigned,
}

/// A single daily start/end window with the hours expected per day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Schedule;
/// use rust_decimal::Decimal;
///
/// let schedule = Schedule::default();
/// assert_eq!(schedule.start_time.to_string(), "09:00:00");
/// assert_eq!(schedule.work_hours_per_day, Decimal::new(8, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Scheduled start of the working day.
    pub start_time: NaiveTime,
    /// Scheduled end of the working day.
    pub end_time: NaiveTime,
    /// Hours expected per working day; always positive.
    pub work_hours_per_day: Decimal,
}

impl Schedule {
    /// Creates a schedule, rejecting a non-positive daily hour count.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if `work_hours_per_day <= 0`.
    pub fn new(
        start_time: NaiveTime,
        end_time: NaiveTime,
        work_hours_per_day: Decimal,
    ) -> EngineResult<Self> {
        let schedule = Self {
            start_time,
            end_time,
            work_hours_per_day,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks the daily hour count is positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.work_hours_per_day <= Decimal::ZERO {
            return Err(EngineError::InvalidSchedule {
                message: format!(
                    "work_hours_per_day must be positive, got {}",
                    self.work_hours_per_day
                ),
            });
        }
        Ok(())
    }
}

impl Default for Schedule {
    /// 09:00 to 18:00 with 8 paid hours.
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            work_hours_per_day: Decimal::new(8, 0),
        }
    }
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Company employee identifier.
    pub id: String,
    /// Display name used in logs.
    pub full_name: String,
    /// Job title.
    #[serde(default)]
    pub position: Option<String>,
    /// Monthly salary rate. `None` or non-positive means the employee cannot be paid.
    #[serde(default)]
    pub salary_rate: Option<Decimal>,
    /// Employment status.
    pub status: EmploymentStatus,
    /// The employee's own schedule, if one was set.
    #[serde(default)]
    pub schedule: Option<Schedule>,
}

impl Employee {
    /// Returns true if the employee is eligible for payroll runs.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Returns the monthly salary rate if it can be used for a payroll run.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] when the rate is missing or not
    /// strictly positive.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "EMP-001".to_string(),
    ///     full_name: "Maria Santos".to_string(),
    ///     position: None,
    ///     salary_rate: Some(Decimal::new(2000000, 2)),
    ///     status: EmploymentStatus::Active,
    ///     schedule: None,
    /// };
    /// assert_eq!(employee.usable_salary().unwrap(), Decimal::new(20000, 0));
    /// ```
    pub fn usable_salary(&self) -> EngineResult<Decimal> {
        match self.salary_rate {
            Some(rate) if rate > Decimal::ZERO => Ok(rate),
            Some(rate) => Err(EngineError::InvalidEmployee {
                employee_id: self.id.clone(),
                message: format!("salary rate must be positive, got {}", rate),
            }),
            None => Err(EngineError::InvalidEmployee {
                employee_id: self.id.clone(),
                message: "salary rate is missing".to_string(),
            }),
        }
    }

    /// Returns the employee's schedule, or `fallback` when none is set.
    pub fn schedule_or<'a>(&'a self, fallback: &'a Schedule) -> &'a Schedule {
        self.schedule.as_ref().unwrap_or(fallback)
    }
}
