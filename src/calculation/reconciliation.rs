//! Daily attendance reconciliation.
//!
//! This module turns one employee's raw clock events for one day into worked,
//! late and overtime figures measured against the employee's schedule.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceEvent, AttendanceKind, Schedule};

use super::rounding::round_hours;

const SECONDS_PER_HOUR: i64 = 3600;

/// Reconciled attendance for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendance {
    /// The day reconciled.
    pub date: NaiveDate,
    /// True when at least one IN/OUT pair produced worked time.
    pub is_present: bool,
    /// Paired duration in hours, rounded to 2 decimals.
    pub total_hours: Decimal,
    /// Worked hours up to the scheduled hours per day.
    pub regular_hours: Decimal,
    /// Worked hours beyond the scheduled hours per day.
    pub overtime_hours: Decimal,
    /// Minutes between scheduled start and the first IN, capped.
    pub late_minutes: i64,
}

impl DailyAttendance {
    /// An absent day with every figure zero.
    pub fn absent(date: NaiveDate) -> Self {
        Self {
            date,
            is_present: false,
            total_hours: Decimal::ZERO,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            late_minutes: 0,
        }
    }
}

/// Reconciles one day of clock events against a schedule.
///
/// Events are sorted by timestamp. Each IN opens a session and the next OUT
/// closes it; an IN arriving while a session is open replaces the open one.
/// OUT events with no open session, ADJUST events and a trailing IN without an
/// OUT contribute nothing. Events dated on other days are ignored.
///
/// If no paired time results, the day is reported absent with every figure
/// zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::reconcile_day;
/// use payroll_engine::models::{AttendanceEvent, AttendanceKind, Schedule};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let event = |h, m, kind| AttendanceEvent {
///     employee_id: "EMP-001".to_string(),
///     timestamp: date.and_hms_opt(h, m, 0).unwrap(),
///     kind,
///     source: "biometric".to_string(),
/// };
/// let events = vec![event(9, 5, AttendanceKind::In), event(17, 5, AttendanceKind::Out)];
///
/// let day = reconcile_day(date, &events, &Schedule::default(), 480);
/// assert!(day.is_present);
/// assert_eq!(day.late_minutes, 5);
/// assert_eq!(day.total_hours, Decimal::new(800, 2));
/// ```
pub fn reconcile_day(
    date: NaiveDate,
    events: &[AttendanceEvent],
    schedule: &Schedule,
    late_minutes_cap: i64,
) -> DailyAttendance {
    let mut ordered: Vec<&AttendanceEvent> =
        events.iter().filter(|event| event.date() == date).collect();
    ordered.sort_by_key(|event| event.timestamp);

    let mut first_in: Option<NaiveDateTime> = None;
    let mut open_in: Option<NaiveDateTime> = None;
    let mut worked_seconds: i64 = 0;

    for event in ordered {
        match event.kind {
            AttendanceKind::In => {
                if first_in.is_none() {
                    first_in = Some(event.timestamp);
                }
                open_in = Some(event.timestamp);
            }
            AttendanceKind::Out => {
                if let Some(clock_in) = open_in.take() {
                    worked_seconds += (event.timestamp - clock_in).num_seconds();
                }
            }
            AttendanceKind::Adjust => {}
        }
    }

    let first_in = match first_in {
        Some(first_in) if worked_seconds > 0 => first_in,
        _ => return DailyAttendance::absent(date),
    };

    let total_hours =
        round_hours(Decimal::from(worked_seconds) / Decimal::from(SECONDS_PER_HOUR));

    let scheduled_start = date.and_time(schedule.start_time);
    let late_minutes = if first_in > scheduled_start {
        (first_in - scheduled_start)
            .num_minutes()
            .min(late_minutes_cap)
    } else {
        0
    };

    let hours_per_day = schedule.work_hours_per_day;
    let regular_hours = total_hours.min(hours_per_day);
    let overtime_hours = round_hours((total_hours - hours_per_day).max(Decimal::ZERO));

    DailyAttendance {
        date,
        is_present: true,
        total_hours,
        regular_hours,
        overtime_hours,
        late_minutes,
    }
}
