//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed rate tables and policy constants
//! that are deserialized from YAML configuration files. Every type also has a
//! built-in default carrying the illustrative statutory tables.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Schedule;

/// Metadata identifying a table set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableMetadata {
    /// Short code for the table set (e.g., "PH-2025").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date of the tables.
    pub version: String,
}

impl Default for TableMetadata {
    fn default() -> Self {
        Self {
            code: "PH-2025".to_string(),
            name: "Philippine statutory contributions (simplified)".to_string(),
            version: "2025-01-01".to_string(),
        }
    }
}

/// PhilHealth premium: a flat rate over a clamped salary, split evenly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhilHealthTable {
    /// Premium rate (e.g., 0.05).
    pub rate: Decimal,
    /// Salary floor used for the premium.
    pub floor: Decimal,
    /// Salary ceiling used for the premium.
    pub ceiling: Decimal,
}

/// One SSS bracket: salaries up to `upper_bound` pay `employee_share`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SssBracket {
    /// Inclusive upper salary bound.
    pub upper_bound: Decimal,
    /// Flat employee contribution.
    pub employee_share: Decimal,
}

/// Pag-IBIG contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagIbigTable {
    /// Salaries at or below this pay the reduced rate.
    pub reduced_rate_threshold: Decimal,
    /// Rate for low salaries (e.g., 0.01).
    pub reduced_rate: Decimal,
    /// Rate for everyone else (e.g., 0.02).
    pub standard_rate: Decimal,
    /// Maximum employee contribution.
    pub cap: Decimal,
}

/// One withholding tax bracket.
///
/// Tax for income in the bracket is `base_tax + (income - excess_over) * rate_percent / 100`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Inclusive upper bound of taxable income.
    pub upper_bound: Decimal,
    /// Income level the percentage applies above.
    pub excess_over: Decimal,
    /// Fixed tax for reaching this bracket.
    pub base_tax: Decimal,
    /// Percentage applied to the excess.
    pub rate_percent: Decimal,
}

/// Contents of `contributions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionTables {
    /// PhilHealth table.
    pub philhealth: PhilHealthTable,
    /// SSS brackets, ascending by upper bound.
    pub sss: Vec<SssBracket>,
    /// Pag-IBIG table.
    pub pagibig: PagIbigTable,
}

/// Contents of `tax.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxTable {
    /// Withholding tax brackets, ascending by upper bound.
    pub brackets: Vec<TaxBracket>,
}

/// All four statutory deduction tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTables {
    /// PhilHealth table.
    pub philhealth: PhilHealthTable,
    /// SSS brackets, ascending by upper bound.
    pub sss: Vec<SssBracket>,
    /// Pag-IBIG table.
    pub pagibig: PagIbigTable,
    /// Withholding tax brackets, ascending by upper bound.
    pub withholding_tax: Vec<TaxBracket>,
}

impl RateTables {
    /// Builds the table set from its two configuration files.
    pub fn from_parts(contributions: ContributionTables, tax: TaxTable) -> Self {
        Self {
            philhealth: contributions.philhealth,
            sss: contributions.sss,
            pagibig: contributions.pagibig,
            withholding_tax: tax.brackets,
        }
    }

    /// Checks the tables are usable by the deduction calculators.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRateTable`] if a bracket table is empty or
    /// not strictly ascending, or the PhilHealth floor exceeds its ceiling.
    pub fn validate(&self) -> EngineResult<()> {
        if self.philhealth.floor > self.philhealth.ceiling {
            return Err(invalid_table(
                "philhealth",
                format!(
                    "floor {} is above ceiling {}",
                    self.philhealth.floor, self.philhealth.ceiling
                ),
            ));
        }

        let sss_bounds: Vec<Decimal> = self.sss.iter().map(|b| b.upper_bound).collect();
        check_ascending("sss", &sss_bounds)?;

        let tax_bounds: Vec<Decimal> = self
            .withholding_tax
            .iter()
            .map(|b| b.upper_bound)
            .collect();
        check_ascending("withholding_tax", &tax_bounds)?;

        Ok(())
    }
}

fn check_ascending(table: &str, bounds: &[Decimal]) -> EngineResult<()> {
    if bounds.is_empty() {
        return Err(invalid_table(table, "must contain at least one bracket"));
    }
    if let Some(pair) = bounds.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(invalid_table(
            table,
            format!(
                "upper bounds must be strictly ascending ({} then {})",
                pair[0], pair[1]
            ),
        ));
    }
    Ok(())
}

fn invalid_table(table: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRateTable {
        table: table.to_string(),
        message: message.into(),
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self {
            philhealth: PhilHealthTable {
                rate: Decimal::new(5, 2),
                floor: Decimal::new(1000000, 2),
                ceiling: Decimal::new(10000000, 2),
            },
            sss: vec![
                SssBracket {
                    upper_bound: Decimal::new(425000, 2),
                    employee_share: Decimal::new(18000, 2),
                },
                SssBracket {
                    upper_bound: Decimal::new(2475000, 2),
                    employee_share: Decimal::new(112500, 2),
                },
                SssBracket {
                    upper_bound: Decimal::new(100000000, 2),
                    employee_share: Decimal::new(135000, 2),
                },
            ],
            pagibig: PagIbigTable {
                reduced_rate_threshold: Decimal::new(150000, 2),
                reduced_rate: Decimal::new(1, 2),
                standard_rate: Decimal::new(2, 2),
                cap: Decimal::new(10000, 2),
            },
            withholding_tax: vec![
                TaxBracket {
                    upper_bound: Decimal::new(2083300, 2),
                    excess_over: Decimal::ZERO,
                    base_tax: Decimal::ZERO,
                    rate_percent: Decimal::ZERO,
                },
                TaxBracket {
                    upper_bound: Decimal::new(3333200, 2),
                    excess_over: Decimal::new(2083300, 2),
                    base_tax: Decimal::ZERO,
                    rate_percent: Decimal::new(15, 0),
                },
                TaxBracket {
                    upper_bound: Decimal::new(6666600, 2),
                    excess_over: Decimal::new(3333300, 2),
                    base_tax: Decimal::new(187500, 2),
                    rate_percent: Decimal::new(20, 0),
                },
                TaxBracket {
                    upper_bound: Decimal::new(16666600, 2),
                    excess_over: Decimal::new(6666700, 2),
                    base_tax: Decimal::new(854180, 2),
                    rate_percent: Decimal::new(25, 0),
                },
            ],
        }
    }
}

/// Policy constants for turning time into money.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollPolicy {
    /// Divisor from monthly salary to hourly rate, and the full-pay hour threshold.
    pub standard_monthly_hours: Decimal,
    /// Multiplier applied to overtime hours.
    pub overtime_multiplier: Decimal,
    /// Maximum late minutes counted for a single day.
    pub late_minutes_cap: i64,
    /// Schedule used for employees without one.
    pub default_schedule: Schedule,
}

impl PayrollPolicy {
    /// Checks the policy values are usable.
    pub fn validate(&self) -> EngineResult<()> {
        if self.standard_monthly_hours <= Decimal::ZERO {
            return Err(invalid_table(
                "policy",
                "standard_monthly_hours must be positive",
            ));
        }
        if self.overtime_multiplier < Decimal::ZERO {
            return Err(invalid_table(
                "policy",
                "overtime_multiplier cannot be negative",
            ));
        }
        if self.late_minutes_cap < 0 {
            return Err(invalid_table("policy", "late_minutes_cap cannot be negative"));
        }
        self.default_schedule
            .validate()
            .map_err(|e| invalid_table("policy", e.to_string()))
    }
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            standard_monthly_hours: Decimal::new(160, 0),
            overtime_multiplier: Decimal::new(125, 2),
            late_minutes_cap: 480,
            default_schedule: Schedule::default(),
        }
    }
}

/// The complete payroll configuration.
///
/// Immutable once built; share it by reference or `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollConfig {
    metadata: TableMetadata,
    tables: RateTables,
    policy: PayrollPolicy,
}

impl PayrollConfig {
    /// Creates a validated configuration from its component parts.
    pub fn new(
        metadata: TableMetadata,
        tables: RateTables,
        policy: PayrollPolicy,
    ) -> EngineResult<Self> {
        tables.validate()?;
        policy.validate()?;
        Ok(Self {
            metadata,
            tables,
            policy,
        })
    }

    /// Returns the table set metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the statutory rate tables.
    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            metadata: TableMetadata::default(),
            tables: RateTables::default(),
            policy: PayrollPolicy::default(),
        }
    }
}
