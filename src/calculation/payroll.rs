//! Payroll computation.
//!
//! Converts an employee's period time totals and monthly salary rate into a
//! [`PayBreakdown`], recording an [`AuditStep`] for every stage so the final
//! figures can be explained line by line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PayrollPolicy, RateTables};
use crate::models::{AuditStep, PayBreakdown};

use super::deductions::{
    calculate_pagibig, calculate_philhealth, calculate_sss, calculate_withholding_tax,
};
use super::period_time::PeriodTimeTotals;
use super::rounding::round_currency;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The result of computing one employee's pay for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The financial breakdown.
    pub breakdown: PayBreakdown,
    /// One audit step per computation stage, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Collects audit steps with sequential numbering.
struct AuditTrail {
    steps: Vec<AuditStep>,
    next_step: u32,
}

impl AuditTrail {
    fn new() -> Self {
        Self {
            steps: Vec::new(),
            next_step: 1,
        }
    }

    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.next_step,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
        self.next_step += 1;
    }
}

/// Computes gross pay, statutory deductions, withholding tax and net pay.
///
/// Stages, in order:
///
/// 1. hourly rate: `salary / standard_monthly_hours`
/// 2. late deduction: `late_minutes * hourly_rate / 60`
/// 3. overtime pay: `overtime_hours * hourly_rate * overtime_multiplier`
/// 4. base pay: the full salary once `regular_hours` reaches the standard
///    monthly hours, else the salary prorated by `regular_hours`
/// 5. gross salary: base pay plus overtime pay
/// 6. SSS, PhilHealth and Pag-IBIG, computed from the monthly salary rather
///    than gross
/// 7. withholding tax on gross less the three contributions
/// 8. total deductions, including the late deduction
/// 9. net pay; when deductions exceed gross, net pay is clamped to zero and
///    total deductions set to gross so `gross - deductions == net` holds
///
/// Every currency amount is rounded to the cent.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{compute_payroll, PeriodTimeTotals};
/// use payroll_engine::config::{PayrollPolicy, RateTables};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = PeriodTimeTotals {
///     regular_hours: Decimal::new(160, 0),
///     ..PeriodTimeTotals::default()
/// };
/// let result = compute_payroll(
///     Decimal::from_str("20000.00").unwrap(),
///     &totals,
///     &RateTables::default(),
///     &PayrollPolicy::default(),
/// );
///
/// assert_eq!(result.breakdown.gross_salary, Decimal::from_str("20000.00").unwrap());
/// assert_eq!(result.breakdown.net_pay, Decimal::from_str("18275.00").unwrap());
/// ```
pub fn compute_payroll(
    salary: Decimal,
    totals: &PeriodTimeTotals,
    tables: &RateTables,
    policy: &PayrollPolicy,
) -> PayrollCalculation {
    let mut trail = AuditTrail::new();
    let standard_hours = policy.standard_monthly_hours;

    // Stage 1: hourly rate
    let hourly_rate = if salary.is_zero() || standard_hours.is_zero() {
        Decimal::ZERO
    } else {
        salary / standard_hours
    };
    trail.record(
        "hourly_rate",
        "Hourly Rate",
        serde_json::json!({
            "salary": salary.to_string(),
            "standard_monthly_hours": standard_hours.to_string()
        }),
        serde_json::json!({ "hourly_rate": round_currency(hourly_rate).to_string() }),
        format!(
            "Monthly salary {} divided by {} standard hours",
            salary,
            standard_hours.normalize()
        ),
    );

    // Stage 2: late deduction
    let late_deduction =
        round_currency(Decimal::from(totals.late_minutes) * hourly_rate / MINUTES_PER_HOUR);
    trail.record(
        "late_deduction",
        "Late Deduction",
        serde_json::json!({
            "late_minutes": totals.late_minutes,
            "hourly_rate": round_currency(hourly_rate).to_string()
        }),
        serde_json::json!({ "late_deduction": late_deduction.to_string() }),
        format!(
            "{} late minutes charged at the hourly rate",
            totals.late_minutes
        ),
    );

    // Stage 3: overtime pay
    let overtime_pay =
        round_currency(totals.overtime_hours * hourly_rate * policy.overtime_multiplier);
    trail.record(
        "overtime_pay",
        "Overtime Pay",
        serde_json::json!({
            "overtime_hours": totals.overtime_hours.normalize().to_string(),
            "multiplier": policy.overtime_multiplier.normalize().to_string()
        }),
        serde_json::json!({ "overtime_pay": overtime_pay.to_string() }),
        format!(
            "{} overtime hours at {}x the hourly rate",
            totals.overtime_hours.normalize(),
            policy.overtime_multiplier.normalize()
        ),
    );

    // Stage 4: base pay proration
    let full_month = totals.regular_hours >= standard_hours;
    let base_pay = if full_month || standard_hours.is_zero() {
        round_currency(salary)
    } else {
        round_currency(salary * (totals.regular_hours / standard_hours))
    };
    let proration_reasoning = if full_month {
        format!(
            "{} regular hours meets the {} hour standard, full salary paid",
            totals.regular_hours.normalize(),
            standard_hours.normalize()
        )
    } else {
        format!(
            "{} of {} standard hours credited, salary prorated",
            totals.regular_hours.normalize(),
            standard_hours.normalize()
        )
    };
    trail.record(
        "base_pay_proration",
        "Base Pay Proration",
        serde_json::json!({
            "salary": salary.to_string(),
            "regular_hours": totals.regular_hours.normalize().to_string()
        }),
        serde_json::json!({ "base_pay": base_pay.to_string() }),
        proration_reasoning,
    );

    // Stage 5: gross salary
    let gross_salary = base_pay + overtime_pay;
    trail.record(
        "gross_salary",
        "Gross Salary",
        serde_json::json!({
            "base_pay": base_pay.to_string(),
            "overtime_pay": overtime_pay.to_string()
        }),
        serde_json::json!({ "gross_salary": gross_salary.to_string() }),
        format!("{} base pay + {} overtime pay", base_pay, overtime_pay),
    );

    // Stage 6: statutory contributions on the monthly salary
    let sss = calculate_sss(salary, &tables.sss);
    let philhealth = calculate_philhealth(salary, &tables.philhealth);
    let pagibig = calculate_pagibig(salary, &tables.pagibig);
    let contributions = sss + philhealth + pagibig;
    trail.record(
        "statutory_contributions",
        "Statutory Contributions",
        serde_json::json!({ "salary": salary.to_string() }),
        serde_json::json!({
            "sss": sss.to_string(),
            "philhealth": philhealth.to_string(),
            "pagibig": pagibig.to_string()
        }),
        format!(
            "Contributions computed from the monthly salary {}, totalling {}",
            salary, contributions
        ),
    );

    // Stage 7: withholding tax
    let taxable_income = gross_salary - contributions;
    let withholding_tax = calculate_withholding_tax(taxable_income, &tables.withholding_tax);
    trail.record(
        "withholding_tax",
        "Withholding Tax",
        serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "contributions": contributions.to_string()
        }),
        serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "withholding_tax": withholding_tax.to_string()
        }),
        format!(
            "Tax of {} on taxable income {}",
            withholding_tax, taxable_income
        ),
    );

    // Stage 8: total deductions
    let other_deductions = round_currency(Decimal::ZERO);
    let computed_deductions = contributions + withholding_tax + late_deduction + other_deductions;
    trail.record(
        "total_deductions",
        "Total Deductions",
        serde_json::json!({
            "contributions": contributions.to_string(),
            "withholding_tax": withholding_tax.to_string(),
            "late_deduction": late_deduction.to_string()
        }),
        serde_json::json!({ "total_deductions": computed_deductions.to_string() }),
        "Contributions, withholding tax and late deduction summed".to_string(),
    );

    // Stage 9: net pay floor
    let (net_pay, total_deductions) = if computed_deductions > gross_salary {
        (round_currency(Decimal::ZERO), gross_salary)
    } else {
        (gross_salary - computed_deductions, computed_deductions)
    };
    let net_reasoning = if total_deductions == computed_deductions {
        format!("{} gross - {} deductions", gross_salary, total_deductions)
    } else {
        format!(
            "Deductions {} exceed gross {}; net pay floored at zero and deductions capped at gross",
            computed_deductions, gross_salary
        )
    };
    trail.record(
        "net_pay",
        "Net Pay",
        serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "total_deductions": computed_deductions.to_string()
        }),
        serde_json::json!({
            "net_pay": net_pay.to_string(),
            "total_deductions": total_deductions.to_string()
        }),
        net_reasoning,
    );

    PayrollCalculation {
        breakdown: PayBreakdown {
            hourly_rate: round_currency(hourly_rate),
            base_pay,
            overtime_pay,
            gross_salary,
            sss_deduction: sss,
            philhealth_deduction: philhealth,
            pagibig_deduction: pagibig,
            taxable_income,
            withholding_tax,
            late_deductions: late_deduction,
            other_deductions,
            total_deductions,
            net_pay,
        },
        audit_steps: trail.steps,
    }
}
