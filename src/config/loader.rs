//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll rate
//! tables, policy and the holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, HolidayCalendar};

use super::types::{
    ContributionTables, PayrollConfig, PayrollPolicy, RateTables, TableMetadata, TaxTable,
};

/// Contents of one file under `holidays/`.
#[derive(Debug, Deserialize)]
struct HolidayFile {
    holidays: Vec<Holiday>,
}

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/ph_2025/
/// ├── metadata.yaml       # Table set code, name and version
/// ├── contributions.yaml  # PhilHealth, SSS and Pag-IBIG tables
/// ├── tax.yaml            # Withholding tax brackets
/// ├── policy.yaml         # Monthly divisor, overtime multiplier, late cap, default schedule
/// └── holidays/
///     └── 2026.yaml       # Holidays for the year
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ph_2025")?;
/// println!("Loaded tables: {}", loader.metadata().name);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
    holidays: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if any required file or the holidays
    ///   directory is missing
    /// - [`EngineError::ConfigParseError`] if any file contains invalid YAML
    /// - [`EngineError::InvalidRateTable`] if the loaded tables fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TableMetadata>(&path.join("metadata.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionTables>(&path.join("contributions.yaml"))?;
        let tax = Self::load_yaml::<TaxTable>(&path.join("tax.yaml"))?;
        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("policy.yaml"))?;
        let holidays = Self::load_holidays(&path.join("holidays"))?;

        let config = PayrollConfig::new(
            metadata,
            RateTables::from_parts(contributions, tax),
            policy,
        )?;

        debug!(
            code = %config.metadata().code,
            version = %config.metadata().version,
            holidays = holidays.len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config, holidays })
    }

    /// Wraps an already-built configuration and calendar.
    pub fn from_parts(config: PayrollConfig, holidays: HolidayCalendar) -> Self {
        Self { config, holidays }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every holiday file in the holidays directory into one calendar.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<HolidayCalendar> {
        let dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut calendar = HolidayCalendar::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<HolidayFile>(&path)?;
                for holiday in file.holidays {
                    calendar.insert(holiday);
                }
            }
        }

        Ok(calendar)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the table set metadata.
    pub fn metadata(&self) -> &TableMetadata {
        self.config.metadata()
    }

    /// Returns the loaded holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HolidayType;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/ph_2025"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn copy_config_to(dir: &Path) {
        fs::create_dir_all(dir.join("holidays")).unwrap();
        for file in ["metadata.yaml", "contributions.yaml", "tax.yaml", "policy.yaml"] {
            fs::copy(Path::new(config_path()).join(file), dir.join(file)).unwrap();
        }
        fs::copy(
            Path::new(config_path()).join("holidays/2026.yaml"),
            dir.join("holidays/2026.yaml"),
        )
        .unwrap();
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().code, "PH-2025");
        assert_eq!(loader.metadata().version, "2025-01-01");
    }

    #[test]
    fn test_loaded_tables_match_built_in_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config().tables(), &RateTables::default());
        assert_eq!(loader.config().policy(), &PayrollPolicy::default());
    }

    #[test]
    fn test_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.config().policy();

        assert_eq!(policy.standard_monthly_hours, dec("160"));
        assert_eq!(policy.overtime_multiplier, dec("1.25"));
        assert_eq!(policy.late_minutes_cap, 480);
        assert_eq!(
            policy.default_schedule.start_time,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_holidays_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = loader.holidays();

        assert!(!holidays.is_empty());
        assert_eq!(
            holidays.holiday_type(NaiveDate::from_ymd_opt(2026, 12, 25).unwrap()),
            Some(HolidayType::Regular)
        );
        assert_eq!(
            holidays.holiday_type(NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()),
            Some(HolidayType::Special)
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("metadata.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        copy_config_to(dir.path());
        fs::write(dir.path().join("tax.yaml"), "brackets: [not: a: bracket").unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("tax.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_holidays_directory_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        copy_config_to(dir.path());
        fs::remove_dir_all(dir.path().join("holidays")).unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("holidays")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_unsorted_sss_table_returns_invalid_table() {
        let dir = tempfile::tempdir().unwrap();
        copy_config_to(dir.path());
        let contributions = r#"
philhealth:
  rate: "0.05"
  floor: "10000.00"
  ceiling: "100000.00"
sss:
  - upper_bound: "24750.00"
    employee_share: "1125.00"
  - upper_bound: "4250.00"
    employee_share: "180.00"
pagibig:
  reduced_rate_threshold: "1500.00"
  reduced_rate: "0.01"
  standard_rate: "0.02"
  cap: "100.00"
"#;
        fs::write(dir.path().join("contributions.yaml"), contributions).unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::InvalidRateTable { table, .. }) => assert_eq!(table, "sss"),
            other => panic!("Expected InvalidRateTable, got {:?}", other),
        }
    }
}
