//! Payroll run orchestration.
//!
//! [`run_payroll`] drives one run end to end: it validates the request,
//! computes a payslip for every active employee in turn and marks the run
//! Processed once every payable employee has one.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate_period_time, compute_payroll};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, Employee, HolidayCalendar, LeaveRequest, PayPeriod, PayrollRun, Payslip,
};

use super::store::PayrollRunStore;

/// Everything a payroll run reads, borrowed from its collaborators.
///
/// `attendance` and `leave_requests` may span many employees and dates; each
/// employee only sees their own records within the period.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs<'a> {
    /// Employees to consider; only Active ones are paid.
    pub employees: &'a [Employee],
    /// Raw clock events.
    pub attendance: &'a [AttendanceEvent],
    /// Leave requests in any status.
    pub leave_requests: &'a [LeaveRequest],
    /// Holiday calendar.
    pub holidays: &'a HolidayCalendar,
}

/// An employee left out of a run, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The employee identifier.
    pub employee_id: String,
    /// Why no payslip was produced.
    pub reason: String,
}

/// The outcome of a completed payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The run as finalized, with its totals.
    pub run: PayrollRun,
    /// Number of payslips produced.
    pub payslip_count: usize,
    /// Active employees that could not be paid.
    pub skipped: Vec<SkippedEmployee>,
}

/// Runs payroll for a period.
///
/// Steps:
///
/// 1. Reject a period that ends before it starts.
/// 2. Warn when the pay date falls before the period ends.
/// 3. Refuse the run outright when no employee is Active.
/// 4. Create the run, then for each Active employee in order: skip with a
///    warning when the salary rate or the employee's own schedule is
///    unusable, otherwise aggregate the period's time, compute pay and store
///    the payslip. A repeated employee id keeps only the first payslip; the
///    repeat is skipped.
/// 5. Mark the run Processed.
///
/// # Errors
///
/// - [`EngineError::InvalidPayPeriod`] if `period` ends before it starts
/// - [`EngineError::NoEligibleEmployees`] if no employee is Active; no run is
///   created
///
/// Unusable employee records never fail the run; they are reported in
/// [`RunSummary::skipped`].
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Employee, EmploymentStatus, HolidayCalendar, PayPeriod};
/// use payroll_engine::run::{run_payroll, PayrollInputs, PayrollRunStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employees = vec![Employee {
///     id: "EMP-001".to_string(),
///     full_name: "Maria Santos".to_string(),
///     position: None,
///     salary_rate: Some(Decimal::new(20000, 0)),
///     status: EmploymentStatus::Active,
///     schedule: None,
/// }];
/// let holidays = HolidayCalendar::new();
/// let inputs = PayrollInputs {
///     employees: &employees,
///     attendance: &[],
///     leave_requests: &[],
///     holidays: &holidays,
/// };
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// ).unwrap();
///
/// let mut store = PayrollRunStore::new();
/// let pay_date = NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
/// let summary = run_payroll(&mut store, &inputs, period, pay_date, &PayrollConfig::default())?;
///
/// assert_eq!(summary.payslip_count, 1);
/// assert!(summary.run.is_finalized());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn run_payroll(
    store: &mut PayrollRunStore,
    inputs: &PayrollInputs<'_>,
    period: PayPeriod,
    pay_date: NaiveDate,
    config: &PayrollConfig,
) -> EngineResult<RunSummary> {
    period.validate()?;

    if pay_date < period.end_date {
        warn!(
            pay_date = %pay_date,
            period_end = %period.end_date,
            "Pay date is before the end of the pay period"
        );
    }

    let eligible: Vec<&Employee> = inputs
        .employees
        .iter()
        .filter(|employee| employee.is_active())
        .collect();
    if eligible.is_empty() {
        warn!(
            period_start = %period.start_date,
            period_end = %period.end_date,
            "No active employees; payroll run cancelled"
        );
        return Err(EngineError::NoEligibleEmployees);
    }

    let start_time = Instant::now();
    let run_id = store.start_run(period, pay_date)?.id;
    info!(
        run_id = %run_id,
        period_start = %period.start_date,
        period_end = %period.end_date,
        employees = eligible.len(),
        "Processing payroll run"
    );

    let mut skipped = Vec::new();
    let mut payslip_count = 0;

    for employee in eligible {
        let salary = match payable_salary(employee) {
            Ok(salary) => salary,
            Err(err) => {
                warn!(
                    run_id = %run_id,
                    employee_id = %employee.id,
                    error = %err,
                    "Skipping employee"
                );
                skipped.push(SkippedEmployee {
                    employee_id: employee.id.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let payslip = build_payslip(run_id, employee, salary, inputs, &period, config);
        if let Err(err) = store.add_payslip(payslip) {
            warn!(
                run_id = %run_id,
                employee_id = %employee.id,
                error = %err,
                "Payslip not stored; skipping employee"
            );
            skipped.push(SkippedEmployee {
                employee_id: employee.id.clone(),
                reason: err.to_string(),
            });
            continue;
        }
        payslip_count += 1;
    }

    let run = store.finalize(run_id)?.clone();
    info!(
        run_id = %run_id,
        payslips = payslip_count,
        skipped = skipped.len(),
        total_gross_pay = %run.total_gross_pay,
        total_net_pay = %run.total_net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll run processed"
    );

    Ok(RunSummary {
        run,
        payslip_count,
        skipped,
    })
}

/// Returns the salary to pay an employee with, checking their own schedule too.
fn payable_salary(employee: &Employee) -> EngineResult<Decimal> {
    let salary = employee.usable_salary()?;
    if let Some(schedule) = &employee.schedule {
        schedule
            .validate()
            .map_err(|err| EngineError::InvalidEmployee {
                employee_id: employee.id.clone(),
                message: err.to_string(),
            })?;
    }
    Ok(salary)
}

/// Computes one employee's payslip for a run.
fn build_payslip(
    run_id: Uuid,
    employee: &Employee,
    salary: Decimal,
    inputs: &PayrollInputs<'_>,
    period: &PayPeriod,
    config: &PayrollConfig,
) -> Payslip {
    let totals = aggregate_period_time(
        employee,
        period,
        inputs.attendance,
        inputs.leave_requests,
        inputs.holidays,
        config.policy(),
    );
    let calculation = compute_payroll(salary, &totals, config.tables(), config.policy());

    Payslip {
        id: Uuid::new_v4(),
        payroll_run_id: run_id,
        employee_id: employee.id.clone(),
        regular_hours: totals.regular_hours,
        overtime_hours: totals.overtime_hours,
        late_minutes: totals.late_minutes,
        breakdown: calculation.breakdown,
        audit_trace: calculation.audit_steps,
        created_at: Utc::now(),
    }
}
