//! Holiday calendar models.
//!
//! The [`HolidayCalendar`] is the single date lookup shared by the working-day
//! counter and the period aggregator.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// Regular holiday; credits a full scheduled day when not worked.
    Regular,
    /// Special (non-working) holiday; credits nothing extra.
    Special,
}

/// A holiday on a specific date.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Holiday, HolidayType};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
///     name: "Independence Day".to_string(),
///     holiday_type: HolidayType::Regular,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
    /// Regular or special.
    pub holiday_type: HolidayType,
}

/// Date-keyed holiday lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    holidays: HashMap<NaiveDate, Holiday>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the holiday on its date.
    pub fn insert(&mut self, holiday: Holiday) {
        self.holidays.insert(holiday.date, holiday);
    }

    /// Returns the holiday on `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&date)
    }

    /// Returns the holiday type on `date`, if any.
    pub fn holiday_type(&self, date: NaiveDate) -> Option<HolidayType> {
        self.get(date).map(|h| h.holiday_type)
    }

    /// Returns true if any holiday falls on `date`.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Number of holidays in the calendar.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the calendar holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl FromIterator<Holiday> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = Holiday>>(iter: I) -> Self {
        let mut calendar = Self::new();
        for holiday in iter {
            calendar.insert(holiday);
        }
        calendar
    }
}

impl From<Vec<Holiday>> for HolidayCalendar {
    fn from(holidays: Vec<Holiday>) -> Self {
        holidays.into_iter().collect()
    }
}
