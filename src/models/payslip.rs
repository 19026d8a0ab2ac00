//! Payslip and payroll run models.
//!
//! This module contains the [`Payslip`] produced for each employee in a run,
//! its financial [`PayBreakdown`], the [`AuditStep`] trace explaining how the
//! numbers were reached, and the [`PayrollRun`] that aggregates them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The money side of a payslip.
///
/// Invariant: `gross_salary - total_deductions == net_pay` and `net_pay >= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Monthly salary divided by the standard monthly hours.
    pub hourly_rate: Decimal,
    /// Salary after proration by credited regular hours.
    pub base_pay: Decimal,
    /// Overtime premium pay.
    pub overtime_pay: Decimal,
    /// Base pay plus overtime pay.
    pub gross_salary: Decimal,
    /// SSS employee contribution.
    pub sss_deduction: Decimal,
    /// PhilHealth employee share.
    pub philhealth_deduction: Decimal,
    /// Pag-IBIG employee contribution.
    pub pagibig_deduction: Decimal,
    /// Gross salary less the three statutory contributions.
    pub taxable_income: Decimal,
    /// Withholding tax on taxable income.
    pub withholding_tax: Decimal,
    /// Monetary value of late minutes.
    pub late_deductions: Decimal,
    /// Other deductions; always zero in this engine.
    pub other_deductions: Decimal,
    /// Sum of every deduction (clamped to gross when net would be negative).
    pub total_deductions: Decimal,
    /// Take-home pay, never negative.
    pub net_pay: Decimal,
}

/// One employee's result for one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for the payslip.
    pub id: Uuid,
    /// The run this payslip belongs to.
    pub payroll_run_id: Uuid,
    /// The employee paid.
    pub employee_id: String,
    /// Regular hours credited, including paid leave and holidays.
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Minutes late across the period.
    pub late_minutes: i64,
    /// The financial breakdown.
    pub breakdown: PayBreakdown,
    /// How the breakdown was computed.
    pub audit_trace: Vec<AuditStep>,
    /// When the payslip was created.
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Payslips are still being computed; payslips may change.
    Processing,
    /// Every eligible employee has a payslip; the run is frozen.
    Processed,
}

/// A payroll run over one pay period.
///
/// The three totals always equal the sums over the run's payslips; they are
/// only written by [`PayrollRun::recompute_totals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The period being paid.
    pub pay_period: PayPeriod,
    /// The date money is paid out.
    pub pay_date: NaiveDate,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// Sum of gross salary over the run's payslips.
    pub total_gross_pay: Decimal,
    /// Sum of total deductions over the run's payslips.
    pub total_deductions: Decimal,
    /// Sum of net pay over the run's payslips.
    pub total_net_pay: Decimal,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollRun {
    /// Creates an empty run in the Processing state.
    pub fn new(pay_period: PayPeriod, pay_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            pay_period,
            pay_date,
            status: RunStatus::Processing,
            total_gross_pay: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_net_pay: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    /// Returns true once the run has been marked Processed.
    pub fn is_finalized(&self) -> bool {
        self.status == RunStatus::Processed
    }

    /// Sets the aggregate totals to the sums over `payslips`.
    pub fn recompute_totals<'a>(&mut self, payslips: impl IntoIterator<Item = &'a Payslip>) {
        let mut gross = Decimal::ZERO;
        let mut deductions = Decimal::ZERO;
        let mut net = Decimal::ZERO;
        for payslip in payslips {
            gross += payslip.breakdown.gross_salary;
            deductions += payslip.breakdown.total_deductions;
            net += payslip.breakdown.net_pay;
        }
        self.total_gross_pay = gross;
        self.total_deductions = deductions;
        self.total_net_pay = net;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_period() -> PayPeriod {
        PayPeriod::new(
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
        .unwrap()
    }

    fn sample_payslip(run_id: Uuid, gross: &str, deductions: &str) -> Payslip {
        let gross = dec(gross);
        let deductions = dec(deductions);
        Payslip {
            id: Uuid::new_v4(),
            payroll_run_id: run_id,
            employee_id: "EMP-001".to_string(),
            regular_hours: dec("160"),
            overtime_hours: Decimal::ZERO,
            late_minutes: 0,
            breakdown: PayBreakdown {
                hourly_rate: dec("125"),
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

    #[test]
    fn test_new_run_is_processing_with_zero_totals() {
        let run = PayrollRun::new(sample_period(), NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
        assert_eq!(run.status, RunStatus::Processing);
        assert!(!run.is_finalized());
        assert_eq!(run.total_gross_pay, Decimal::ZERO);
        assert_eq!(run.total_net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_recompute_totals_sums_payslips() {
        let mut run =
            PayrollRun::new(sample_period(), NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
        let payslips = vec![
            sample_payslip(run.id, "20000.00", "1725.00"),
            sample_payslip(run.id, "35000.50", "4120.25"),
        ];

        run.recompute_totals(&payslips);

        assert_eq!(run.total_gross_pay, dec("55000.50"));
        assert_eq!(run.total_deductions, dec("5845.25"));
        assert_eq!(run.total_net_pay, dec("49155.25"));
        assert_eq!(
            run.total_gross_pay - run.total_deductions,
            run.total_net_pay
        );
    }

    #[test]
    fn test_recompute_totals_with_no_payslips_resets_to_zero() {
        let mut run =
            PayrollRun::new(sample_period(), NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
        run.total_gross_pay = dec("100");
        run.recompute_totals(&[]);
        assert_eq!(run.total_gross_pay, Decimal::ZERO);
    }

    #[test]
    fn test_run_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Processed).unwrap(),
            "\"processed\""
        );
    }

    #[test]
    fn test_payslip_serializes_money_as_strings() {
        let payslip = sample_payslip(Uuid::new_v4(), "20000.00", "1725.00");
        let json = serde_json::to_value(&payslip).unwrap();
        assert_eq!(json["breakdown"]["net_pay"], "18275.00");
        assert_eq!(json["employee_id"], "EMP-001");
    }
}
