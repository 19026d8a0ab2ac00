//! Leave balance ledger.
//!
//! The [`LeaveLedger`] owns leave requests together with the balances they
//! draw on. Every status change and the balance mutation it triggers happen
//! inside a single `&mut self` call, so a refused change leaves both sides
//! untouched.
//!
//! A debit is the working-day count of the request's date range against the
//! calendar passed in at approval time. The debited amount is recorded with
//! the request, and leaving Approved (or deletion) credits back exactly that
//! amount, so the net effect on `used` is zero even if the calendar changed
//! in between.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculation::count_working_days;
use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayCalendar, LeaveBalance, LeaveRequest, LeaveStatus};

/// What a ledger operation did to the matching balance's `used` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerMutation {
    /// `used` increased by `days`.
    Debit {
        /// Working days debited.
        days: Decimal,
    },
    /// `used` decreased by `days`.
    Credit {
        /// Working days credited back.
        days: Decimal,
    },
    /// No balance was touched.
    Unchanged,
}

type BalanceKey = (String, String);

fn balance_key(employee_id: &str, leave_type: &str) -> BalanceKey {
    (employee_id.to_string(), leave_type.to_string())
}

/// In-memory register of leave requests and balances.
///
/// Wrap in a mutex when shared between threads; each method is one critical
/// section.
///
/// # Example
///
/// ```
/// use payroll_engine::leave::{LeaveLedger, LedgerMutation};
/// use payroll_engine::models::{HolidayCalendar, LeaveRequest, LeaveStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let holidays = HolidayCalendar::new();
/// let mut ledger = LeaveLedger::new();
/// ledger.set_entitlement("EMP-001", "Vacation", Decimal::new(15, 0)).unwrap();
///
/// // Monday to Friday
/// let request = LeaveRequest::new(
///     "EMP-001",
///     "Vacation",
///     NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(),
/// );
/// let id = request.id;
/// ledger.submit(request, &holidays).unwrap();
///
/// let mutation = ledger.transition(id, LeaveStatus::Approved, &holidays).unwrap();
/// assert_eq!(mutation, LedgerMutation::Debit { days: Decimal::new(5, 0) });
/// assert_eq!(ledger.balance("EMP-001", "Vacation").unwrap().remaining(), Decimal::new(10, 0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeaveLedger {
    requests: HashMap<Uuid, LeaveRequest>,
    balances: HashMap<BalanceKey, LeaveBalance>,
    /// Days debited for each currently Approved request.
    debited: HashMap<Uuid, Decimal>,
}

impl LeaveLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entitlement for an (employee, leave type) pair, creating the
    /// balance with nothing used if it does not exist yet.
    ///
    /// Lowering an entitlement below `used` is allowed; `remaining` then goes
    /// negative until more leave is credited back.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidLeaveRequest`] for a negative entitlement.
    pub fn set_entitlement(
        &mut self,
        employee_id: &str,
        leave_type: &str,
        entitlement: Decimal,
    ) -> EngineResult<&LeaveBalance> {
        if entitlement < Decimal::ZERO {
            return Err(EngineError::InvalidLeaveRequest {
                message: format!("entitlement cannot be negative, got {}", entitlement),
            });
        }

        let balance = self
            .balances
            .entry(balance_key(employee_id, leave_type))
            .or_insert_with(|| LeaveBalance {
                employee_id: employee_id.to_string(),
                leave_type: leave_type.to_string(),
                entitlement: Decimal::ZERO,
                used: Decimal::ZERO,
            });
        balance.entitlement = entitlement;
        Ok(balance)
    }

    /// Returns the balance for an (employee, leave type) pair.
    pub fn balance(&self, employee_id: &str, leave_type: &str) -> Option<&LeaveBalance> {
        self.balances.get(&balance_key(employee_id, leave_type))
    }

    /// Returns every balance for an employee, ordered by leave type.
    pub fn balances_for(&self, employee_id: &str) -> Vec<&LeaveBalance> {
        let mut balances: Vec<&LeaveBalance> = self
            .balances
            .values()
            .filter(|balance| balance.employee_id == employee_id)
            .collect();
        balances.sort_by(|a, b| a.leave_type.cmp(&b.leave_type));
        balances
    }

    /// Records a new leave request.
    ///
    /// A request created already Approved is debited immediately, subject to
    /// the same balance check as an approval.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidLeaveRequest`] if the range ends before it
    ///   starts or the id is already registered
    /// - [`EngineError::LeaveBalanceNotFound`] /
    ///   [`EngineError::InsufficientLeaveBalance`] if created Approved without
    ///   enough balance
    pub fn submit(
        &mut self,
        request: LeaveRequest,
        holidays: &HolidayCalendar,
    ) -> EngineResult<LedgerMutation> {
        if request.end_date < request.start_date {
            return Err(EngineError::InvalidLeaveRequest {
                message: format!(
                    "end date {} is before start date {}",
                    request.end_date, request.start_date
                ),
            });
        }
        if self.requests.contains_key(&request.id) {
            return Err(EngineError::InvalidLeaveRequest {
                message: format!("request {} already exists", request.id),
            });
        }

        let mutation = if request.is_approved() {
            let days = self.check_debit(&request, holidays)?;
            self.apply(&request, LedgerMutation::Debit { days })
        } else {
            LedgerMutation::Unchanged
        };

        debug!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            status = %request.status,
            "Leave request recorded"
        );
        self.requests.insert(request.id, request);
        Ok(mutation)
    }

    /// Moves a request to a new status, debiting or crediting its balance.
    ///
    /// Allowed moves are Pending to Approved, Pending to Rejected and
    /// Approved to Rejected. Requesting the current status is a no-op.
    /// `holidays` is only read when approving; leaving Approved credits the
    /// days recorded at approval.
    ///
    /// # Errors
    ///
    /// - [`EngineError::LeaveRequestNotFound`] for an unknown id
    /// - [`EngineError::InvalidLeaveTransition`] for a disallowed move
    /// - [`EngineError::LeaveBalanceNotFound`] if the balance row is missing
    /// - [`EngineError::InsufficientLeaveBalance`] if approval would exceed
    ///   the remaining days
    ///
    /// On error neither the request nor any balance changes.
    pub fn transition(
        &mut self,
        id: Uuid,
        to: LeaveStatus,
        holidays: &HolidayCalendar,
    ) -> EngineResult<LedgerMutation> {
        let request = self
            .requests
            .get(&id)
            .ok_or(EngineError::LeaveRequestNotFound { id })?;
        let from = request.status;

        if from == to {
            return Ok(LedgerMutation::Unchanged);
        }

        let mutation = match (from, to) {
            (LeaveStatus::Pending, LeaveStatus::Approved) => {
                let days = self.check_debit(request, holidays)?;
                LedgerMutation::Debit { days }
            }
            (LeaveStatus::Approved, LeaveStatus::Rejected) => {
                let days = self.check_credit(request)?;
                LedgerMutation::Credit { days }
            }
            (LeaveStatus::Pending, LeaveStatus::Rejected) => LedgerMutation::Unchanged,
            _ => return Err(EngineError::InvalidLeaveTransition { from, to }),
        };

        let request = request.clone();
        let mutation = self.apply(&request, mutation);
        if let Some(stored) = self.requests.get_mut(&id) {
            stored.status = to;
        }

        debug!(
            request_id = %id,
            from = %from,
            to = %to,
            "Leave request status changed"
        );
        Ok(mutation)
    }

    /// Deletes a request, crediting back the days debited when it was
    /// approved.
    ///
    /// # Errors
    ///
    /// - [`EngineError::LeaveRequestNotFound`] for an unknown id
    /// - [`EngineError::LeaveBalanceNotFound`] if an Approved request's balance
    ///   row is missing; the request is kept
    pub fn remove(&mut self, id: Uuid) -> EngineResult<(LeaveRequest, LedgerMutation)> {
        let request = self
            .requests
            .get(&id)
            .ok_or(EngineError::LeaveRequestNotFound { id })?;

        let mutation = if request.is_approved() {
            let days = self.check_credit(request)?;
            LedgerMutation::Credit { days }
        } else {
            LedgerMutation::Unchanged
        };

        let request = self
            .requests
            .remove(&id)
            .ok_or(EngineError::LeaveRequestNotFound { id })?;
        let mutation = self.apply(&request, mutation);
        Ok((request, mutation))
    }

    /// Returns a request by id.
    pub fn request(&self, id: Uuid) -> Option<&LeaveRequest> {
        self.requests.get(&id)
    }

    /// Returns an employee's requests ordered by start date.
    pub fn requests_for(&self, employee_id: &str) -> Vec<&LeaveRequest> {
        let mut requests: Vec<&LeaveRequest> = self
            .requests
            .values()
            .filter(|request| request.employee_id == employee_id)
            .collect();
        requests.sort_by_key(|request| (request.start_date, request.requested_on));
        requests
    }

    /// Returns a snapshot of every request, ordered by start date.
    ///
    /// This is the form the period aggregator consumes.
    pub fn requests(&self) -> Vec<LeaveRequest> {
        let mut requests: Vec<LeaveRequest> = self.requests.values().cloned().collect();
        requests.sort_by_key(|request| (request.start_date, request.requested_on));
        requests
    }

    /// Verifies a debit for `request` is possible and returns its size.
    fn check_debit(
        &self,
        request: &LeaveRequest,
        holidays: &HolidayCalendar,
    ) -> EngineResult<Decimal> {
        let days = count_working_days(request.start_date, request.end_date, holidays);

        let Some(balance) = self.balance(&request.employee_id, &request.leave_type) else {
            warn!(
                request_id = %request.id,
                employee_id = %request.employee_id,
                leave_type = %request.leave_type,
                "Leave approval refused: no balance"
            );
            return Err(EngineError::LeaveBalanceNotFound {
                employee_id: request.employee_id.clone(),
                leave_type: request.leave_type.clone(),
            });
        };

        let remaining = balance.remaining();
        if remaining < days {
            warn!(
                request_id = %request.id,
                employee_id = %request.employee_id,
                leave_type = %request.leave_type,
                requested = %days,
                remaining = %remaining,
                "Leave approval refused: insufficient balance"
            );
            return Err(EngineError::InsufficientLeaveBalance {
                employee_id: request.employee_id.clone(),
                leave_type: request.leave_type.clone(),
                requested: days,
                remaining,
            });
        }

        Ok(days)
    }

    /// Verifies a credit for `request` has a balance to land on and returns
    /// the days debited when it was approved.
    fn check_credit(&self, request: &LeaveRequest) -> EngineResult<Decimal> {
        if self.balance(&request.employee_id, &request.leave_type).is_none() {
            return Err(EngineError::LeaveBalanceNotFound {
                employee_id: request.employee_id.clone(),
                leave_type: request.leave_type.clone(),
            });
        }
        Ok(self
            .debited
            .get(&request.id)
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    /// Applies a checked mutation to the request's balance.
    fn apply(&mut self, request: &LeaveRequest, mutation: LedgerMutation) -> LedgerMutation {
        let key = balance_key(&request.employee_id, &request.leave_type);
        let Some(balance) = self.balances.get_mut(&key) else {
            return LedgerMutation::Unchanged;
        };

        match mutation {
            LedgerMutation::Debit { days } => {
                balance.used += days;
                self.debited.insert(request.id, days);
            }
            LedgerMutation::Credit { days } => {
                balance.used -= days;
                self.debited.remove(&request.id);
            }
            LedgerMutation::Unchanged => return mutation,
        }

        debug!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            leave_type = %request.leave_type,
            mutation = ?mutation,
            used = %balance.used,
            "Leave balance updated"
        );
        mutation
    }
}
