//! Statutory deduction calculators.
//!
//! Four pure functions of a monthly amount, each driven by a table from
//! [`RateTables`](crate::config::RateTables) and returning a currency amount rounded to the cent.

use rust_decimal::Decimal;

use crate::config::{PagIbigTable, PhilHealthTable, SssBracket, TaxBracket};

use super::rounding::{round_currency, round_tax};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Computes the employee share of the PhilHealth premium.
///
/// The salary is clamped to the table's floor and ceiling, multiplied by the
/// premium rate and split evenly between employer and employee.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_philhealth;
/// use payroll_engine::config::RateTables;
/// use rust_decimal::Decimal;
///
/// let tables = RateTables::default();
/// let share = calculate_philhealth(Decimal::new(20000, 0), &tables.philhealth);
/// assert_eq!(share, Decimal::new(50000, 2));
/// ```
pub fn calculate_philhealth(salary: Decimal, table: &PhilHealthTable) -> Decimal {
    let basis = salary.max(table.floor).min(table.ceiling);
    round_currency(basis * table.rate / Decimal::TWO)
}

/// Looks up the SSS employee contribution for a salary.
///
/// Uses the first bracket whose upper bound is at or above the salary, or the
/// last bracket when the salary exceeds every bound. An empty table yields zero.
pub fn calculate_sss(salary: Decimal, brackets: &[SssBracket]) -> Decimal {
    let bracket = brackets
        .iter()
        .find(|bracket| salary <= bracket.upper_bound)
        .or_else(|| brackets.last());

    match bracket {
        Some(bracket) => round_currency(bracket.employee_share),
        None => round_currency(Decimal::ZERO),
    }
}

/// Computes the Pag-IBIG employee contribution.
pub fn calculate_pagibig(salary: Decimal, table: &PagIbigTable) -> Decimal {
    let rate = if salary <= table.reduced_rate_threshold {
        table.reduced_rate
    } else {
        table.standard_rate
    };
    round_currency((salary * rate).min(table.cap))
}

/// Computes monthly withholding tax on taxable income.
///
/// Income at or below the first bracket's bound is untaxed. Otherwise the
/// first bracket whose bound covers the income applies
/// `base_tax + (income - excess_over) * rate_percent / 100`. Income above
/// every bound uses the last bracket's formula.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use payroll_engine::config::RateTables;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tables = RateTables::default();
/// let untaxed = calculate_withholding_tax(Decimal::from_str("20833.00").unwrap(), &tables.withholding_tax);
/// assert_eq!(untaxed, Decimal::ZERO);
///
/// let taxed = calculate_withholding_tax(Decimal::from_str("25000.00").unwrap(), &tables.withholding_tax);
/// assert_eq!(taxed, Decimal::from_str("625.05").unwrap());
/// ```
pub fn calculate_withholding_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let Some(first) = brackets.first() else {
        return round_tax(Decimal::ZERO);
    };
    if taxable_income <= first.upper_bound {
        return round_tax(Decimal::ZERO);
    }

    let bracket = brackets
        .iter()
        .find(|bracket| taxable_income <= bracket.upper_bound)
        .or_else(|| brackets.last())
        .unwrap_or(first);

    let excess = (taxable_income - bracket.excess_over).max(Decimal::ZERO);
    round_tax(bracket.base_tax + excess * bracket.rate_percent / HUNDRED)
}
