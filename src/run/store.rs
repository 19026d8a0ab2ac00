//! Payroll run register.
//!
//! [`PayrollRunStore`] keeps each run with its payslips and maintains the
//! run's aggregate totals: every insert, replacement or removal of a payslip
//! recomputes them in the same call. Once a run is Processed its payslips
//! are frozen.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayrollRun, Payslip, RunStatus};

#[derive(Debug, Clone)]
struct RunEntry {
    run: PayrollRun,
    payslips: Vec<Payslip>,
}

impl RunEntry {
    fn ensure_open(&self) -> EngineResult<()> {
        if self.run.is_finalized() {
            warn!(run_id = %self.run.id, "Refused to modify a processed payroll run");
            return Err(EngineError::PayrollRunFinalized { id: self.run.id });
        }
        Ok(())
    }

    fn recompute(&mut self) {
        self.run.recompute_totals(&self.payslips);
    }
}

/// In-memory register of payroll runs and their payslips.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use payroll_engine::run::PayrollRunStore;
/// use chrono::NaiveDate;
///
/// let mut store = PayrollRunStore::new();
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// ).unwrap();
///
/// let pay_date = NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
/// let run_id = store.start_run(period, pay_date).unwrap().id;
/// assert!(store.payslips(run_id).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayrollRunStore {
    runs: HashMap<Uuid, RunEntry>,
}

impl PayrollRunStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a run in the Processing state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPayPeriod`] if the period ends before it starts.
    pub fn start_run(
        &mut self,
        period: PayPeriod,
        pay_date: NaiveDate,
    ) -> EngineResult<&PayrollRun> {
        period.validate()?;
        let run = PayrollRun::new(period, pay_date);
        let id = run.id;
        let entry = self.runs.entry(id).or_insert(RunEntry {
            run,
            payslips: Vec::new(),
        });
        Ok(&entry.run)
    }

    /// Returns a run by id.
    pub fn run(&self, id: Uuid) -> Option<&PayrollRun> {
        self.runs.get(&id).map(|entry| &entry.run)
    }

    /// Returns every run, most recent pay period first.
    pub fn runs(&self) -> Vec<&PayrollRun> {
        let mut runs: Vec<&PayrollRun> = self.runs.values().map(|entry| &entry.run).collect();
        runs.sort_by(|a, b| {
            b.pay_period
                .start_date
                .cmp(&a.pay_period.start_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        runs
    }

    /// Returns the payslips of a run in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PayrollRunNotFound`] for an unknown run.
    pub fn payslips(&self, run_id: Uuid) -> EngineResult<&[Payslip]> {
        self.entry(run_id).map(|entry| entry.payslips.as_slice())
    }

    /// Adds a payslip to its run and refreshes the run totals.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PayrollRunNotFound`] if `payroll_run_id` is unknown
    /// - [`EngineError::PayrollRunFinalized`] if the run is Processed
    /// - [`EngineError::DuplicatePayslip`] if the employee already has a
    ///   payslip in the run
    pub fn add_payslip(&mut self, payslip: Payslip) -> EngineResult<&PayrollRun> {
        let run_id = payslip.payroll_run_id;
        let entry = self.entry_mut(run_id)?;
        entry.ensure_open()?;

        if entry
            .payslips
            .iter()
            .any(|existing| existing.employee_id == payslip.employee_id)
        {
            return Err(EngineError::DuplicatePayslip {
                run_id,
                employee_id: payslip.employee_id,
            });
        }

        entry.payslips.push(payslip);
        entry.recompute();
        Ok(&entry.run)
    }

    /// Replaces the payslip with the same id and refreshes the run totals.
    ///
    /// Returns the payslip that was replaced.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PayrollRunNotFound`] if `payroll_run_id` is unknown
    /// - [`EngineError::PayrollRunFinalized`] if the run is Processed
    /// - [`EngineError::PayslipNotFound`] if no payslip has that id
    /// - [`EngineError::DuplicatePayslip`] if the replacement names an
    ///   employee who already has another payslip in the run
    pub fn replace_payslip(&mut self, payslip: Payslip) -> EngineResult<Payslip> {
        let run_id = payslip.payroll_run_id;
        let entry = self.entry_mut(run_id)?;
        entry.ensure_open()?;

        if entry.payslips.iter().any(|existing| {
            existing.id != payslip.id && existing.employee_id == payslip.employee_id
        }) {
            return Err(EngineError::DuplicatePayslip {
                run_id,
                employee_id: payslip.employee_id,
            });
        }

        let slot = entry
            .payslips
            .iter_mut()
            .find(|existing| existing.id == payslip.id)
            .ok_or(EngineError::PayslipNotFound { id: payslip.id })?;
        let previous = std::mem::replace(slot, payslip);

        entry.recompute();
        Ok(previous)
    }

    /// Removes a payslip from its run and refreshes the run totals.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PayrollRunNotFound`] for an unknown run
    /// - [`EngineError::PayrollRunFinalized`] if the run is Processed
    /// - [`EngineError::PayslipNotFound`] if no payslip has that id
    pub fn remove_payslip(&mut self, run_id: Uuid, payslip_id: Uuid) -> EngineResult<Payslip> {
        let entry = self.entry_mut(run_id)?;
        entry.ensure_open()?;

        let index = entry
            .payslips
            .iter()
            .position(|existing| existing.id == payslip_id)
            .ok_or(EngineError::PayslipNotFound { id: payslip_id })?;
        let removed = entry.payslips.remove(index);

        entry.recompute();
        Ok(removed)
    }

    /// Marks a run Processed, freezing its payslips.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PayrollRunNotFound`] for an unknown run
    /// - [`EngineError::PayrollRunFinalized`] if the run is already Processed
    pub fn finalize(&mut self, run_id: Uuid) -> EngineResult<&PayrollRun> {
        let entry = self.entry_mut(run_id)?;
        entry.ensure_open()?;
        entry.recompute();
        entry.run.status = RunStatus::Processed;
        Ok(&entry.run)
    }

    fn entry(&self, run_id: Uuid) -> EngineResult<&RunEntry> {
        self.runs
            .get(&run_id)
            .ok_or(EngineError::PayrollRunNotFound { id: run_id })
    }

    fn entry_mut(&mut self, run_id: Uuid) -> EngineResult<&mut RunEntry> {
        self.runs
            .get_mut(&run_id)
            .ok_or(EngineError::PayrollRunNotFound { id: run_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayBreakdown;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn march() -> PayPeriod {
        PayPeriod::new(make_date("2026-03-01"), make_date("2026-03-31")).unwrap()
    }

    fn payslip(run_id: Uuid, employee_id: &str, gross: &str, deductions: &str) -> Payslip {
        let gross = dec(gross);
        let deductions = dec(deductions);
        Payslip {
            id: Uuid::new_v4(),
            payroll_run_id: run_id,
            employee_id: employee_id.to_string(),
            regular_hours: dec("160"),
            overtime_hours: Decimal::ZERO,
            late_minutes: 0,
            breakdown: PayBreakdown {
                hourly_rate: Decimal::ZERO,
                base_pay: gross,
                overtime_pay: Decimal::ZERO,
                gross_salary: gross,
                sss_deduction: Decimal::ZERO,
                philhealth_deduction: Decimal::ZERO,
                pagibig_deduction: Decimal::ZERO,
                taxable_income: gross,
                withholding_tax: Decimal::ZERO,
                late_deductions: Decimal::ZERO,
                other_deductions: Decimal::ZERO,
                total_deductions: deductions,
                net_pay: gross - deductions,
            },
            audit_trace: vec![],
            created_at: Utc::now(),
        }
    }

    fn store_with_run() -> (PayrollRunStore, Uuid) {
        let mut store = PayrollRunStore::new();
        let run_id = store.start_run(march(), make_date("2026-04-05")).unwrap().id;
        (store, run_id)
    }

    #[test]
    fn test_start_run_is_processing() {
        let (store, run_id) = store_with_run();
        let run = store.run(run_id).unwrap();
        assert_eq!(run.status, RunStatus::Processing);
        assert_eq!(run.total_gross_pay, Decimal::ZERO);
    }

    #[test]
    fn test_totals_follow_every_payslip_change() {
        let (mut store, run_id) = store_with_run();

        store
            .add_payslip(payslip(run_id, "EMP-001", "20000.00", "1725.00"))
            .unwrap();
        let second = payslip(run_id, "EMP-002", "30000.00", "3000.00");
        let second_id = second.id;
        let run = store.add_payslip(second).unwrap();
        assert_eq!(run.total_gross_pay, dec("50000.00"));
        assert_eq!(run.total_deductions, dec("4725.00"));
        assert_eq!(run.total_net_pay, dec("45275.00"));

        let mut corrected = payslip(run_id, "EMP-002", "25000.00", "2500.00");
        corrected.id = second_id;
        let previous = store.replace_payslip(corrected).unwrap();
        assert_eq!(previous.breakdown.gross_salary, dec("30000.00"));
        assert_eq!(store.run(run_id).unwrap().total_gross_pay, dec("45000.00"));

        store.remove_payslip(run_id, second_id).unwrap();
        let run = store.run(run_id).unwrap();
        assert_eq!(run.total_gross_pay, dec("20000.00"));
        assert_eq!(run.total_net_pay, dec("18275.00"));
        assert_eq!(store.payslips(run_id).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_employee_payslip_is_refused() {
        let (mut store, run_id) = store_with_run();
        store
            .add_payslip(payslip(run_id, "EMP-001", "20000.00", "1725.00"))
            .unwrap();

        match store.add_payslip(payslip(run_id, "EMP-001", "1.00", "0.00")) {
            Err(EngineError::DuplicatePayslip { employee_id, .. }) => {
                assert_eq!(employee_id, "EMP-001");
            }
            other => panic!("Expected DuplicatePayslip, got {:?}", other),
        }
        assert_eq!(store.run(run_id).unwrap().total_gross_pay, dec("20000.00"));
    }

    #[test]
    fn test_replacement_cannot_take_another_employees_slot() {
        let (mut store, run_id) = store_with_run();
        store
            .add_payslip(payslip(run_id, "EMP-001", "20000.00", "1725.00"))
            .unwrap();
        let second = payslip(run_id, "EMP-002", "30000.00", "3000.00");
        let second_id = second.id;
        store.add_payslip(second).unwrap();

        let mut renamed = payslip(run_id, "EMP-001", "30000.00", "3000.00");
        renamed.id = second_id;
        match store.replace_payslip(renamed) {
            Err(EngineError::DuplicatePayslip { employee_id, .. }) => {
                assert_eq!(employee_id, "EMP-001");
            }
            other => panic!("Expected DuplicatePayslip, got {:?}", other),
        }
        let payslips = store.payslips(run_id).unwrap();
        assert_eq!(payslips[1].employee_id, "EMP-002");

        // The slot being replaced may keep its own employee
        let mut corrected = payslip(run_id, "EMP-002", "28000.00", "2800.00");
        corrected.id = second_id;
        assert!(store.replace_payslip(corrected).is_ok());
        assert_eq!(store.run(run_id).unwrap().total_gross_pay, dec("48000.00"));
    }

    #[test]
    fn test_processed_run_refuses_changes() {
        let (mut store, run_id) = store_with_run();
        let slip = payslip(run_id, "EMP-001", "20000.00", "1725.00");
        let slip_id = slip.id;
        store.add_payslip(slip.clone()).unwrap();
        store.finalize(run_id).unwrap();

        assert!(matches!(
            store.remove_payslip(run_id, slip_id),
            Err(EngineError::PayrollRunFinalized { .. })
        ));
        assert!(matches!(
            store.replace_payslip(slip),
            Err(EngineError::PayrollRunFinalized { .. })
        ));
        assert!(matches!(
            store.add_payslip(payslip(run_id, "EMP-002", "1.00", "0.00")),
            Err(EngineError::PayrollRunFinalized { .. })
        ));
        assert!(matches!(
            store.finalize(run_id),
            Err(EngineError::PayrollRunFinalized { .. })
        ));
        assert_eq!(store.payslips(run_id).unwrap().len(), 1);
        assert_eq!(store.run(run_id).unwrap().total_gross_pay, dec("20000.00"));
    }

    #[test]
    fn test_unknown_run_and_payslip() {
        let (mut store, run_id) = store_with_run();
        let missing = Uuid::new_v4();

        assert!(matches!(
            store.payslips(missing),
            Err(EngineError::PayrollRunNotFound { id }) if id == missing
        ));
        assert!(matches!(
            store.remove_payslip(run_id, missing),
            Err(EngineError::PayslipNotFound { id }) if id == missing
        ));
    }

    #[test]
    fn test_start_run_rejects_inverted_period() {
        let mut store = PayrollRunStore::new();
        let inverted = PayPeriod {
            start_date: make_date("2026-03-31"),
            end_date: make_date("2026-03-01"),
        };
        assert!(matches!(
            store.start_run(inverted, make_date("2026-04-05")),
            Err(EngineError::InvalidPayPeriod { .. })
        ));
        assert!(store.runs().is_empty());
    }

    #[test]
    fn test_runs_are_listed_latest_period_first() {
        let mut store = PayrollRunStore::new();
        store.start_run(march(), make_date("2026-04-05")).unwrap();
        let april = PayPeriod::new(make_date("2026-04-01"), make_date("2026-04-30")).unwrap();
        store.start_run(april, make_date("2026-05-05")).unwrap();

        let runs = store.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].pay_period.start_date, make_date("2026-04-01"));
    }
}
