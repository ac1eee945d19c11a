//! Table configuration
//!
//! The frontend embeds a TOML file at build time and parses it on startup.
//! Every key is optional; missing keys fall back to the stock page setup.

use serde::{Deserialize, Serialize};

use crate::table::ColumnSet;

/// Default relative path of the JSON document.
pub const DEFAULT_DATA_URL: &str = "mock-data.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Resource fetched on every load
    pub data_url: String,
    /// Which columns the table shows
    pub columns: ColumnSet,
    /// Swap `.` and `,` in numeric cells
    pub european_numbers: bool,
    pub window: WindowConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            columns: ColumnSet::default(),
            european_numbers: false,
            window: WindowConfig::default(),
        }
    }
}

/// Date picker offsets, all relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub default_start_days: u32,
    pub end_offset_days: u32,
    pub earliest_months: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_start_days: 8,
            end_offset_days: 1,
            earliest_months: 1,
        }
    }
}

impl TableConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse, falling back to defaults (with a warning) on any error.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml_str(s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid table config, using defaults");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data_url.trim().is_empty() {
            return Err(ConfigError::Invalid("data_url must not be empty".into()));
        }
        if self.window.default_start_days < self.window.end_offset_days {
            return Err(ConfigError::Invalid(format!(
                "window.default_start_days ({}) is after window.end_offset_days ({})",
                self.window.default_start_days, self.window.end_offset_days
            )));
        }
        Ok(())
    }
}

/// Errors that can occur while loading the table config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = TableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.data_url, "mock-data.json");
        assert_eq!(config.columns, ColumnSet::Summary);
    }

    #[test]
    fn parses_full_document() {
        let toml = r#"
data_url = "data/events.json"
columns = "detailed"
european_numbers = true

[window]
default_start_days = 14
end_offset_days = 0
earliest_months = 3
"#;

        let config = TableConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.data_url, "data/events.json");
        assert_eq!(config.columns, ColumnSet::Detailed);
        assert!(config.european_numbers);
        assert_eq!(config.window.default_start_days, 14);
        assert_eq!(config.window.end_offset_days, 0);
        assert_eq!(config.window.earliest_months, 3);
    }

    #[test]
    fn partial_window_keeps_other_defaults() {
        let config = TableConfig::from_toml_str("[window]\nearliest_months = 2\n").unwrap();
        assert_eq!(config.window.earliest_months, 2);
        assert_eq!(config.window.default_start_days, 8);
    }

    #[test]
    fn rejects_inverted_window() {
        let toml = "[window]\ndefault_start_days = 1\nend_offset_days = 5\n";
        assert!(matches!(TableConfig::from_toml_str(toml), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_toml_falls_back_to_defaults() {
        assert!(matches!(TableConfig::from_toml_str("columns = [1"), Err(ConfigError::Parse(_))));
        assert_eq!(TableConfig::from_toml_or_default("columns = \"wide\""), TableConfig::default());
    }
}
