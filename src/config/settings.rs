//! User settings for the finance tracker
//!
//! Manages user preferences: display currency, the short date format used for
//! stored dates, the size of the dashboard's recent list, and logging.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::parse_date;

/// User settings for the finance tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Currency symbol used when displaying amounts (never stored)
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Short date format (strftime) used when writing new record dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of records shown in the dashboard's recent list
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Default diagnostic log level (overridden by `FINTRACK_LOG`)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_limit: default_recent_limit(),
            log_level: default_log_level(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TrackerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TrackerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            TrackerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<(), TrackerError> {
        if self.date_format.trim().is_empty() {
            return Err(TrackerError::Config("date_format cannot be empty".into()));
        }
        let invalid = |reason: &str| {
            TrackerError::Config(format!("date_format '{}' {}", self.date_format, reason))
        };

        // Day and month differ so a swapped pair does not read back as equal
        let date = NaiveDate::from_ymd_opt(2001, 2, 13)
            .ok_or_else(|| invalid("cannot be checked"))?;

        // Time or unknown specifiers make chrono's Display fail
        let mut sample = String::new();
        write!(sample, "{}", date.format(&self.date_format))
            .map_err(|_| invalid("cannot format a calendar date"))?;

        // A comma in the date would split the stored line into extra fields
        if sample.contains(',') {
            return Err(invalid(
                "produces a comma, which collides with the field delimiter",
            ));
        }

        match parse_date(&sample, &self.date_format) {
            Ok(parsed) if parsed == date => Ok(()),
            _ => Err(invalid("writes dates that cannot be read back")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.recent_limit, 5);
        assert!(settings.audit_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.date_format = "%m/%d/%Y".into();
        settings.recent_limit = 10;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%m/%d/%Y");
        assert_eq!(loaded.recent_limit, 10);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "€"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.recent_limit, 5);
    }

    #[test]
    fn test_comma_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%b %d, %Y"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_time_specifier_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Y-%m-%d %H:%M"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("cannot format"));
    }

    #[test]
    fn test_unreadable_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%b %Y"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(err.to_string().contains("cannot be read back"));
    }

    #[test]
    fn test_alternative_date_formats_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        for format in ["%d.%m.%Y", "%m/%d/%Y", "%d-%m-%Y"] {
            let settings = Settings {
                date_format: format.into(),
                ..Settings::default()
            };
            settings.save(&paths).unwrap();
            assert_eq!(Settings::load_or_create(&paths).unwrap().date_format, format);
        }
    }
}
