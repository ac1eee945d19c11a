//! Event record model, deserialized straight from the source JSON document.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::{self, DateParseError};

/// Anomaly flag value marking a record as anomalous.
pub const ANOMALY_YES: &str = "Yes";
/// Anomaly flag value marking a record as within normal limits.
pub const ANOMALY_NO: &str = "No";

/// One event entry from the source data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventRecord {
    /// `YYYY-MM-DD`
    #[serde(deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub banner: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub event_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub platform: String,
    /// `"Yes"` / `"No"`
    #[serde(deserialize_with = "null_as_empty")]
    pub anomaly_detected: String,
    pub health_score: Metric,
    pub event_importance: Metric,
    pub platform_coverage: Metric,
    pub event_hits: Metric,
    // Older data files carry the misspelled key
    #[serde(alias = "completnessScore")]
    pub completeness_score: Metric,
}

/// A `null` category reads as empty so one sparse record cannot fail the document.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl EventRecord {
    /// Parse the record's timestamp.
    pub fn date(&self) -> Result<NaiveDate, DateParseError> {
        dates::parse_source(&self.timestamp)
    }

    pub fn is_anomalous(&self) -> bool {
        self.anomaly_detected == ANOMALY_YES
    }

    pub fn is_normal(&self) -> bool {
        self.anomaly_detected == ANOMALY_NO
    }
}

/// A display-only value. The source document is loose about these fields,
/// so numbers and strings are both accepted and any other JSON value is
/// kept as-is for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Int(i64),
    Float(f64),
    Text(String),
    #[default]
    Absent,
    Other(serde_json::Value),
}

impl Metric {
    /// Finite numeric value if the metric is a number or a numeric string.
    /// `"NaN"` and `"inf"` are text, not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Metric::Int(n) => Some(*n as f64),
            Metric::Float(f) => Some(*f),
            Metric::Text(s) => s.trim().parse().ok(),
            Metric::Absent | Metric::Other(_) => None,
        };
        value.filter(|v: &f64| v.is_finite())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Metric::Absent)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Int(n) => write!(f, "{n}"),
            Metric::Float(v) => write!(f, "{v}"),
            Metric::Text(s) => f.write_str(s),
            Metric::Absent => Ok(()),
            Metric::Other(v) => write!(f, "{v}"),
        }
    }
}
