//! Working-day counting.
//!
//! A working day is a calendar day that is neither a Saturday, a Sunday, nor a
//! date in the holiday calendar. The same definition drives holiday crediting
//! in the period aggregator and the leave ledger's debits and credits, so an
//! approval and a later rejection over the same range always cancel.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::models::HolidayCalendar;

/// Returns true if the date falls on a Saturday or Sunday.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()));
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()));
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns true if the date is neither a weekend day nor a holiday.
pub fn is_working_day(date: NaiveDate, holidays: &HolidayCalendar) -> bool {
    !is_weekend(date) && !holidays.is_holiday(date)
}

/// Counts working days in the inclusive range `[start, end]`.
///
/// Returns zero when `end` is before `start`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::count_working_days;
/// use payroll_engine::models::HolidayCalendar;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// // Monday 2026-03-02 to Sunday 2026-03-08
/// let days = count_working_days(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
///     &HolidayCalendar::new(),
/// );
/// assert_eq!(days, Decimal::new(5, 0));
/// ```
pub fn count_working_days(start: NaiveDate, end: NaiveDate, holidays: &HolidayCalendar) -> Decimal {
    let count = start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| is_working_day(*date, holidays))
        .count();
    Decimal::from(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Holiday, HolidayType};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn calendar_with(dates: &[(&str, HolidayType)]) -> HolidayCalendar {
        dates
            .iter()
            .map(|(date, holiday_type)| Holiday {
                date: make_date(date),
                name: format!("Holiday {}", date),
                holiday_type: *holiday_type,
            })
            .collect()
    }

    #[test]
    fn test_seven_days_with_weekend_and_holiday_counts_four() {
        // Wednesday 2026-06-10 to Tuesday 2026-06-16, Independence Day on Friday
        let calendar = calendar_with(&[("2026-06-12", HolidayType::Regular)]);
        let days = count_working_days(make_date("2026-06-10"), make_date("2026-06-16"), &calendar);
        assert_eq!(days, Decimal::new(4, 0));
    }

    #[test]
    fn test_special_holiday_is_also_excluded() {
        let calendar = calendar_with(&[("2026-08-21", HolidayType::Special)]);
        let days = count_working_days(make_date("2026-08-17"), make_date("2026-08-21"), &calendar);
        assert_eq!(days, Decimal::new(4, 0));
    }

    #[test]
    fn test_holiday_on_weekend_is_not_double_counted() {
        // 2026-11-01 is a Sunday
        let calendar = calendar_with(&[("2026-11-01", HolidayType::Special)]);
        let days = count_working_days(make_date("2026-10-26"), make_date("2026-11-01"), &calendar);
        assert_eq!(days, Decimal::new(5, 0));
    }

    #[test]
    fn test_single_day_range() {
        let calendar = HolidayCalendar::new();
        let monday = make_date("2026-03-02");
        let saturday = make_date("2026-03-07");
        assert_eq!(count_working_days(monday, monday, &calendar), Decimal::ONE);
        assert_eq!(count_working_days(saturday, saturday, &calendar), Decimal::ZERO);
    }

    #[test]
    fn test_inverted_range_counts_zero() {
        let days = count_working_days(
            make_date("2026-03-10"),
            make_date("2026-03-02"),
            &HolidayCalendar::new(),
        );
        assert_eq!(days, Decimal::ZERO);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(make_date("2026-03-07")));
        assert!(is_weekend(make_date("2026-03-08")));
        assert!(!is_weekend(make_date("2026-03-06")));
    }
}
