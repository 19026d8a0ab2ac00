//! Period time aggregation.
//!
//! Walks a pay period day by day and combines reconciled attendance, approved
//! leave and holiday credit into the time totals fed to payroll computation.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollPolicy;
use crate::models::{
    AttendanceEvent, Employee, HolidayCalendar, HolidayType, LeaveRequest, PayPeriod,
};

use super::reconciliation::reconcile_day;
use super::working_days::is_weekend;

/// Time totals for one employee over one pay period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTimeTotals {
    /// Worked regular hours plus hours credited for paid leave and holidays.
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Late minutes across the period.
    pub late_minutes: i64,
    /// Days with paired attendance.
    pub days_worked: u32,
    /// Weekdays credited from approved leave.
    pub paid_leave_days: u32,
    /// Weekdays credited as regular holidays.
    pub paid_holiday_days: u32,
}

/// How a single day was credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayCredit {
    Attendance,
    PaidLeave,
    PaidHoliday,
    Nothing,
}

/// Aggregates an employee's time over a pay period.
///
/// `events` and `leave_requests` may contain records for other employees;
/// only those matching `employee.id` are used, and only approved leave
/// counts. Each day is credited by the first rule that applies:
///
/// 1. attendance events exist: the reconciled regular, overtime and late figures
/// 2. approved leave on a weekday that is not a holiday: scheduled hours
/// 3. a regular holiday on a weekday: scheduled hours
/// 4. otherwise nothing
///
/// The employee's schedule is used when set, else the policy default.
pub fn aggregate_period_time(
    employee: &Employee,
    period: &PayPeriod,
    events: &[AttendanceEvent],
    leave_requests: &[LeaveRequest],
    holidays: &HolidayCalendar,
    policy: &PayrollPolicy,
) -> PeriodTimeTotals {
    let schedule = employee.schedule_or(&policy.default_schedule);

    let mut events_by_day: HashMap<NaiveDate, Vec<AttendanceEvent>> = HashMap::new();
    for event in events
        .iter()
        .filter(|event| event.employee_id == employee.id && period.contains_date(event.date()))
    {
        events_by_day
            .entry(event.date())
            .or_default()
            .push(event.clone());
    }

    let approved_leave: Vec<&LeaveRequest> = leave_requests
        .iter()
        .filter(|request| request.employee_id == employee.id && request.is_approved())
        .collect();

    let mut totals = PeriodTimeTotals::default();

    for date in period.days() {
        let weekend = is_weekend(date);
        let holiday_type = holidays.holiday_type(date);
        let on_leave = approved_leave.iter().any(|request| request.covers(date));

        let credit = match events_by_day.get(&date) {
            Some(day_events) => {
                let day = reconcile_day(date, day_events, schedule, policy.late_minutes_cap);
                totals.regular_hours += day.regular_hours;
                totals.overtime_hours += day.overtime_hours;
                totals.late_minutes += day.late_minutes;
                if day.is_present {
                    totals.days_worked += 1;
                }
                DayCredit::Attendance
            }
            None if on_leave && !weekend && holiday_type.is_none() => DayCredit::PaidLeave,
            None if holiday_type == Some(HolidayType::Regular) && !weekend => {
                DayCredit::PaidHoliday
            }
            None => DayCredit::Nothing,
        };

        match credit {
            DayCredit::PaidLeave => {
                totals.regular_hours += schedule.work_hours_per_day;
                totals.paid_leave_days += 1;
            }
            DayCredit::PaidHoliday => {
                totals.regular_hours += schedule.work_hours_per_day;
                totals.paid_holiday_days += 1;
            }
            DayCredit::Attendance | DayCredit::Nothing => {}
        }
    }

    totals
}
