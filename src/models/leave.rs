//! Leave request and leave balance models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Filed, awaiting a decision.
    Pending,
    /// Approved; the balance has been debited.
    Approved,
    /// Rejected; no balance effect.
    Rejected,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "Pending"),
            LeaveStatus::Approved => write!(f, "Approved"),
            LeaveStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee asking for leave.
    pub employee_id: String,
    /// Free-form leave category (e.g. "Vacation", "Sick").
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Optional reason given by the employee.
    #[serde(default)]
    pub reason: Option<String>,
    /// Current lifecycle state.
    pub status: LeaveStatus,
    /// When the request was filed.
    pub requested_on: DateTime<Utc>,
}

impl LeaveRequest {
    /// Creates a pending request filed now.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{LeaveRequest, LeaveStatus};
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest::new(
    ///     "EMP-001",
    ///     "Vacation",
    ///     NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(),
    /// );
    /// assert_eq!(request.status, LeaveStatus::Pending);
    /// assert!(request.covers(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap()));
    /// ```
    pub fn new(
        employee_id: impl Into<String>,
        leave_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            leave_type: leave_type.into(),
            start_date,
            end_date,
            reason: None,
            status: LeaveStatus::Pending,
            requested_on: Utc::now(),
        }
    }

    /// Returns a copy of the request with the given status.
    pub fn with_status(mut self, status: LeaveStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if `date` falls inside the request's range (inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the request is currently approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}

/// Leave entitlement and usage for one (employee, leave type) pair.
///
/// `used` only moves through leave request transitions; see
/// [`crate::leave::LeaveLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave category.
    pub leave_type: String,
    /// Days granted.
    pub entitlement: Decimal,
    /// Days consumed by approved requests.
    pub used: Decimal,
}

impl LeaveBalance {
    /// Days still available. Negative only if entitlement was lowered after approval.
    pub fn remaining(&self) -> Decimal {
        self.entitlement - self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_covers_is_inclusive() {
        let request = LeaveRequest::new(
            "EMP-001",
            "Sick",
            make_date("2026-03-09"),
            make_date("2026-03-10"),
        );
        assert!(request.covers(make_date("2026-03-09")));
        assert!(request.covers(make_date("2026-03-10")));
        assert!(!request.covers(make_date("2026-03-08")));
        assert!(!request.covers(make_date("2026-03-11")));
    }

    #[test]
    fn test_with_status_sets_status() {
        let request = LeaveRequest::new(
            "EMP-001",
            "Sick",
            make_date("2026-03-09"),
            make_date("2026-03-10"),
        )
        .with_status(LeaveStatus::Approved);
        assert!(request.is_approved());
    }

    #[test]
    fn test_remaining_can_go_negative() {
        let balance = LeaveBalance {
            employee_id: "EMP-001".to_string(),
            leave_type: "Vacation".to_string(),
            entitlement: Decimal::from_str("3").unwrap(),
            used: Decimal::from_str("5").unwrap(),
        };
        assert_eq!(balance.remaining(), Decimal::from_str("-2").unwrap());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Approved).unwrap(),
            "\"approved\""
        );
        let status: LeaveStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, LeaveStatus::Rejected);
    }
}
