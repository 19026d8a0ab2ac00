//! Raw clock events.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The kind of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceKind {
    /// Clock-in.
    In,
    /// Clock-out.
    Out,
    /// Manual adjustment marker; carries no worked time.
    Adjust,
}

/// A single clock event for an employee.
///
/// Events are append-only; corrections are made by recording new events.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceEvent, AttendanceKind};
/// use chrono::NaiveDateTime;
///
/// let event = AttendanceEvent {
///     employee_id: "EMP-001".to_string(),
///     timestamp: NaiveDateTime::parse_from_str("2026-03-02 09:05:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     kind: AttendanceKind::In,
///     source: "biometric".to_string(),
/// };
/// assert_eq!(event.date().to_string(), "2026-03-02");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The employee who clocked.
    pub employee_id: String,
    /// When the event happened.
    pub timestamp: NaiveDateTime,
    /// What kind of event this is.
    pub kind: AttendanceKind,
    /// Where the event came from (e.g. "biometric", "manual").
    #[serde(default)]
    pub source: String,
}

impl AttendanceEvent {
    /// The calendar day the event belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
