//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type defining the inclusive date
//! window a payroll run covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range for a payroll run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
/// ).unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert_eq!(period.num_days(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPayPeriod`] if `end_date < start_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Checks that the period does not end before it starts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidPayPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every calendar day of the period in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of calendar days in the period; zero if it ends before it starts.
    pub fn num_days(&self) -> i64 {
        ((self.end_date - self.start_date).num_days() + 1).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_rejects_end_before_start() {
        let result = PayPeriod::new(make_date("2026-03-15"), make_date("2026-03-01"));
        match result {
            Err(EngineError::InvalidPayPeriod { start, end }) => {
                assert_eq!(start, make_date("2026-03-15"));
                assert_eq!(end, make_date("2026-03-01"));
            }
            other => panic!("Expected InvalidPayPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_single_day_period_is_valid() {
        let period = PayPeriod::new(make_date("2026-03-02"), make_date("2026-03-02")).unwrap();
        assert_eq!(period.num_days(), 1);
        assert_eq!(period.days().collect::<Vec<_>>(), vec![make_date("2026-03-02")]);
    }

    #[test]
    fn test_days_iterates_inclusive_range() {
        let period = PayPeriod::new(make_date("2026-02-27"), make_date("2026-03-02")).unwrap();
        let days: Vec<NaiveDate> = period.days().collect();
        assert_eq!(
            days,
            vec![
                make_date("2026-02-27"),
                make_date("2026-02-28"),
                make_date("2026-03-01"),
                make_date("2026-03-02"),
            ]
        );
    }

    #[test]
    fn test_contains_date_bounds() {
        let period = PayPeriod::new(make_date("2026-03-01"), make_date("2026-03-15")).unwrap();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
        assert!(!period.contains_date(make_date("2026-02-28")));
        assert!(!period.contains_date(make_date("2026-03-16")));
    }

    #[test]
    fn test_deserialize_pay_period() {
        let json = r#"{"start_date": "2026-03-01", "end_date": "2026-03-31"}"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.num_days(), 31);
    }
}
