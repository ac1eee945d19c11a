//! Date conversions between the picker display format and the source format.
//!
//! - Display: `dd/mm/yyyy` (what the date inputs show and accept)
//! - Source: `YYYY-MM-DD` (what the JSON document carries)

use chrono::{Days, Months, NaiveDate};

use crate::config::WindowConfig;

/// Failure to read a date string in the expected layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {input:?}, expected {expected}")]
pub struct DateParseError {
    pub input: String,
    pub expected: &'static str,
}

const DISPLAY_LAYOUT: &str = "dd/mm/yyyy";
const SOURCE_LAYOUT: &str = "YYYY-MM-DD";

/// Format a date for display in the pickers.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use evtable_types::dates::format_display;
/// let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// assert_eq!(format_display(d), "07/03/2024");
/// ```
pub fn format_display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a `dd/mm/yyyy` picker value.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use evtable_types::dates::parse_display;
/// assert_eq!(parse_display("31/01/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
/// assert!(parse_display("2024-01-31").is_err());
/// ```
pub fn parse_display(s: &str) -> Result<NaiveDate, DateParseError> {
    split_parts(s, '/')
        .and_then(|[day, month, year]| ymd(year, month, day))
        .ok_or_else(|| error(s, DISPLAY_LAYOUT))
}

/// Parse a `YYYY-MM-DD` source timestamp.
pub fn parse_source(s: &str) -> Result<NaiveDate, DateParseError> {
    split_parts(s, '-')
        .and_then(|[year, month, day]| ymd(year, month, day))
        .ok_or_else(|| error(s, SOURCE_LAYOUT))
}

/// Exactly three all-digit parts, in input order.
fn split_parts(s: &str, sep: char) -> Option<[u32; 3]> {
    let mut parts = s.trim().split(sep).map(|p| {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            None
        } else {
            p.parse::<u32>().ok()
        }
    });
    let out = [parts.next()??, parts.next()??, parts.next()??];
    parts.next().is_none().then_some(out)
}

fn ymd(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn error(input: &str, expected: &'static str) -> DateParseError {
    DateParseError {
        input: input.to_string(),
        expected,
    }
}

/// Default and selectable range of the date pickers, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateWindow {
    /// Window using the stock offsets (8 days back, ending yesterday, one month of history).
    pub fn for_today(today: NaiveDate) -> Self {
        Self::from_config(today, &WindowConfig::default())
    }

    pub fn from_config(today: NaiveDate, cfg: &WindowConfig) -> Self {
        let back = |days: u32| today.checked_sub_days(Days::new(days.into())).unwrap_or(NaiveDate::MIN);
        let latest = back(cfg.end_offset_days);
        let earliest = today
            .checked_sub_months(Months::new(cfg.earliest_months))
            .unwrap_or(NaiveDate::MIN)
            .min(latest);
        Self {
            default_start: back(cfg.default_start_days).clamp(earliest, latest),
            default_end: latest,
            earliest,
            latest,
        }
    }

    /// Clamp a picked date into the selectable range.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.earliest, self.latest)
    }

    /// Canonical picker text for typed input: valid dates are clamped and
    /// re-formatted, anything else is kept as typed (trimmed).
    pub fn normalize_display(&self, text: &str) -> String {
        match parse_display(text) {
            Ok(date) => format_display(self.clamp(date)),
            Err(_) => text.trim().to_string(),
        }
    }
}
