//! Filter selection and the per-record predicate.
//!
//! The UI snapshots its controls into [`FilterInputs`] on every change, turns
//! that into an immutable [`FilterSelection`], and runs [`apply_filter`] over
//! the freshly fetched records.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::dates::{self, DateParseError, DateWindow};
use crate::record::EventRecord;

/// Selector value meaning "apply no filter on this field".
pub const ALL: &str = "All";
/// Anomaly selector value keeping only anomalous records.
pub const ANOMALOUS_ONLY: &str = "Anomalous data only";
/// Anomaly selector value keeping only normal records.
pub const WITHIN_NORMAL: &str = "Within Normal Limits";
/// Anomaly selector value applying no filter.
pub const UNSPECIFIED: &str = "Unspecified";

/// Raw control values, exactly as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub start: String,
    pub end: String,
    pub banner: String,
    pub event: String,
    pub platform: String,
    pub anomaly: String,
}

/// Category selector: no filter, or one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Map a selector value; `"All"` and the empty string mean no filter.
    pub fn from_selector(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    fn matches_exact(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(want) => want == value,
        }
    }

    fn matches_ignore_case(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(want) => want.to_lowercase() == value.to_lowercase(),
        }
    }
}

/// Tri-state anomaly selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnomalyFilter {
    AnomalousOnly,
    NormalOnly,
    #[default]
    Unspecified,
}

impl AnomalyFilter {
    /// Any value other than the two known labels passes unconditionally.
    pub fn from_selector(value: &str) -> Self {
        match value {
            ANOMALOUS_ONLY => AnomalyFilter::AnomalousOnly,
            WITHIN_NORMAL => AnomalyFilter::NormalOnly,
            _ => AnomalyFilter::Unspecified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnomalyFilter::AnomalousOnly => ANOMALOUS_ONLY,
            AnomalyFilter::NormalOnly => WITHIN_NORMAL,
            AnomalyFilter::Unspecified => UNSPECIFIED,
        }
    }

    /// All selector choices (for populating the dropdown)
    pub fn all() -> &'static [AnomalyFilter] {
        &[
            AnomalyFilter::Unspecified,
            AnomalyFilter::AnomalousOnly,
            AnomalyFilter::NormalOnly,
        ]
    }

    fn matches(&self, record: &EventRecord) -> bool {
        match self {
            AnomalyFilter::AnomalousOnly => record.is_anomalous(),
            AnomalyFilter::NormalOnly => record.is_normal(),
            AnomalyFilter::Unspecified => true,
        }
    }
}

/// Immutable snapshot of the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub banner: CategoryFilter,
    pub event: CategoryFilter,
    pub platform: CategoryFilter,
    pub anomaly: AnomalyFilter,
}

impl FilterSelection {
    /// Unfiltered selection over `[from, to]`.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            banner: CategoryFilter::All,
            event: CategoryFilter::All,
            platform: CategoryFilter::All,
            anomaly: AnomalyFilter::Unspecified,
        }
    }

    /// Build a selection from raw control values.
    ///
    /// Returns `Ok(None)` if either date is empty (nothing to load yet), and an
    /// error if a non-empty date does not parse. When a window is given, both
    /// dates are clamped into it.
    pub fn from_inputs(
        inputs: &FilterInputs,
        window: Option<&DateWindow>,
    ) -> Result<Option<Self>, DateParseError> {
        if inputs.start.trim().is_empty() || inputs.end.trim().is_empty() {
            return Ok(None);
        }
        let mut from = dates::parse_display(&inputs.start)?;
        let mut to = dates::parse_display(&inputs.end)?;
        if let Some(w) = window {
            from = w.clamp(from);
            to = w.clamp(to);
        }

        Ok(Some(Self {
            from,
            to,
            banner: CategoryFilter::from_selector(&inputs.banner),
            event: CategoryFilter::from_selector(&inputs.event),
            platform: CategoryFilter::from_selector(&inputs.platform),
            anomaly: AnomalyFilter::from_selector(&inputs.anomaly),
        }))
    }

    /// Whether a record with a known date passes every clause.
    pub fn matches(&self, record: &EventRecord, date: NaiveDate) -> bool {
        date >= self.from
            && date <= self.to
            && self.banner.matches_exact(&record.banner)
            && self.event.matches_exact(&record.event_name)
            && self.platform.matches_ignore_case(&record.platform)
            && self.anomaly.matches(record)
    }
}

/// Result of filtering one fetched document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub rows: Vec<EventRecord>,
    /// Records dropped because their timestamp did not parse
    pub skipped: usize,
}

/// Keep the records matching `selection`, in document order.
///
/// Records with an unparseable timestamp never match and are counted in
/// [`FilterOutcome::skipped`].
pub fn apply_filter(records: &[EventRecord], selection: &FilterSelection) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    for record in records {
        match record.date() {
            Ok(date) => {
                if selection.matches(record, date) {
                    outcome.rows.push(record.clone());
                }
            }
            Err(_) => outcome.skipped += 1,
        }
    }
    if outcome.skipped > 0 {
        tracing::warn!(skipped = outcome.skipped, "Skipped records with malformed timestamps");
    }
    outcome
}

/// Distinct category values offered by the selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryOptions {
    pub banners: Vec<String>,
    pub events: Vec<String>,
    pub platforms: Vec<String>,
}

impl CategoryOptions {
    /// Collect distinct values in [`option_order`]. Platforms are
    /// de-duplicated case-insensitively, keeping the first spelling seen.
    pub fn from_records(records: &[EventRecord]) -> Self {
        let banners: BTreeSet<&str> = records.iter().map(|r| r.banner.as_str()).collect();
        let events: BTreeSet<&str> = records.iter().map(|r| r.event_name.as_str()).collect();

        let mut seen = BTreeSet::new();
        let mut platforms: Vec<String> = Vec::new();
        for r in records {
            if !r.platform.is_empty() && seen.insert(r.platform.to_lowercase()) {
                platforms.push(r.platform.clone());
            }
        }
        platforms.sort_by(|a, b| option_order(a, b));

        Self {
            banners: non_empty(banners),
            events: non_empty(events),
            platforms,
        }
    }

    /// Make sure currently selected values stay in their lists, so a selection
    /// survives a reload that no longer contains it.
    pub fn with_selected(mut self, inputs: &FilterInputs) -> Self {
        keep_selected(&mut self.banners, &inputs.banner, false);
        keep_selected(&mut self.events, &inputs.event, false);
        keep_selected(&mut self.platforms, &inputs.platform, true);
        self
    }
}

/// Case-insensitive, with exact spelling as the tiebreak so the order is total.
fn option_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn non_empty(values: BTreeSet<&str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort_by(|a, b| option_order(a, b));
    out
}

fn keep_selected(list: &mut Vec<String>, selected: &str, ignore_case: bool) {
    if matches!(CategoryFilter::from_selector(selected), CategoryFilter::All) {
        return;
    }
    let present = list.iter().any(|v| {
        if ignore_case {
            v.to_lowercase() == selected.to_lowercase()
        } else {
            v == selected
        }
    });
    if !present {
        list.push(selected.to_string());
        list.sort_by(|a, b| option_order(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(timestamp: &str, banner: &str, event: &str, platform: &str, anomaly: &str) -> EventRecord {
        EventRecord {
            timestamp: timestamp.to_string(),
            banner: banner.to_string(),
            event_name: event.to_string(),
            platform: platform.to_string(),
            anomaly_detected: anomaly.to_string(),
            ..Default::default()
        }
    }

    fn inputs(start: &str, end: &str) -> FilterInputs {
        FilterInputs {
            start: start.into(),
            end: end.into(),
            banner: ALL.into(),
            event: ALL.into(),
            platform: ALL.into(),
            anomaly: UNSPECIFIED.into(),
        }
    }

    fn timestamps(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.rows.iter().map(|r| r.timestamp.as_str()).collect()
    }

    #[test]
    fn january_range_keeps_only_january_record() {
        let records = vec![
            record("2023-12-31", "A", "E", "Web", "No"),
            record("2024-01-15", "A", "E", "Web", "No"),
            record("2024-02-01", "A", "E", "Web", "No"),
        ];
        let sel = FilterSelection::from_inputs(&inputs("01/01/2024", "31/01/2024"), None)
            .unwrap()
            .unwrap();

        assert_eq!(timestamps(&apply_filter(&records, &sel)), vec!["2024-01-15"]);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let records = vec![
            record("2024-01-01", "A", "E", "Web", "No"),
            record("2024-01-31", "A", "E", "Web", "No"),
        ];
        let sel = FilterSelection::between(ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert_eq!(apply_filter(&records, &sel).rows.len(), 2);
    }

    #[test]
    fn anomalous_only_keeps_yes_records() {
        let records = vec![
            record("2024-01-10", "A", "E", "Web", "Yes"),
            record("2024-01-10", "A", "E", "Web", "No"),
        ];
        let mut sel = FilterSelection::between(ymd(2024, 1, 1), ymd(2024, 1, 31));

        sel.anomaly = AnomalyFilter::from_selector("Anomalous data only");
        let out = apply_filter(&records, &sel);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].anomaly_detected, "Yes");

        sel.anomaly = AnomalyFilter::from_selector("Within Normal Limits");
        let out = apply_filter(&records, &sel);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].anomaly_detected, "No");

        sel.anomaly = AnomalyFilter::from_selector("something else");
        assert_eq!(apply_filter(&records, &sel).rows.len(), 2);
    }

    #[test]
    fn platform_matches_case_insensitively() {
        let records = vec![
            record("2024-01-10", "A", "E", "WEB", "No"),
            record("2024-01-10", "A", "E", "iOS", "No"),
        ];
        let mut sel = FilterSelection::between(ymd(2024, 1, 1), ymd(2024, 1, 31));
        sel.platform = CategoryFilter::from_selector("web");

        let out = apply_filter(&records, &sel);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].platform, "WEB");
    }

    #[test]
    fn banner_and_event_match_exactly() {
        let records = vec![
            record("2024-01-10", "Acme", "Checkout", "Web", "No"),
            record("2024-01-10", "acme", "Checkout", "Web", "No"),
            record("2024-01-10", "Acme", "Login", "Web", "No"),
        ];
        let mut sel = FilterSelection::between(ymd(2024, 1, 1), ymd(2024, 1, 31));
        sel.banner = CategoryFilter::from_selector("Acme");
        sel.event = CategoryFilter::from_selector("Checkout");

        let out = apply_filter(&records, &sel);
        assert_eq!(out.rows, vec![records[0].clone()]);
    }

    #[test]
    fn all_sentinel_is_a_no_op() {
        let records = vec![
            record("2024-01-10", "X", "Y", "Z", "Yes"),
            record("2024-01-11", "", "", "", ""),
        ];
        let sel = FilterSelection::from_inputs(&inputs("01/01/2024", "31/01/2024"), None)
            .unwrap()
            .unwrap();
        assert_eq!(apply_filter(&records, &sel).rows.len(), 2);
    }

    #[test]
    fn malformed_timestamps_are_skipped() {
        let records = vec![
            record("2024-01-10", "A", "E", "Web", "No"),
            record("10/01/2024", "A", "E", "Web", "No"),
            record("", "A", "E", "Web", "No"),
        ];
        let sel = FilterSelection::between(ymd(2024, 1, 1), ymd(2024, 1, 31));
        let out = apply_filter(&records, &sel);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.skipped, 2);
    }

    #[test]
    fn empty_date_aborts_without_error() {
        assert_eq!(FilterSelection::from_inputs(&inputs("", "31/01/2024"), None), Ok(None));
        assert_eq!(FilterSelection::from_inputs(&inputs("01/01/2024", "  "), None), Ok(None));
    }

    #[test]
    fn malformed_picker_date_is_an_error() {
        let err = FilterSelection::from_inputs(&inputs("2024-01-01", "31/01/2024"), None).unwrap_err();
        assert_eq!(err.input, "2024-01-01");
    }

    #[test]
    fn window_clamps_picked_dates() {
        let window = DateWindow::for_today(ymd(2024, 3, 15));
        let sel = FilterSelection::from_inputs(&inputs("01/01/2024", "31/12/2024"), Some(&window))
            .unwrap()
            .unwrap();
        assert_eq!(sel.from, ymd(2024, 2, 15));
        assert_eq!(sel.to, ymd(2024, 3, 14));
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let records = vec![
            record("2024-01-10", "Zeta", "Login", "web", "No"),
            record("2024-01-10", "Acme", "Checkout", "WEB", "No"),
            record("2024-01-10", "Acme", "", "Android", "No"),
        ];
        let opts = CategoryOptions::from_records(&records);
        assert_eq!(opts.banners, vec!["Acme", "Zeta"]);
        assert_eq!(opts.events, vec!["Checkout", "Login"]);
        assert_eq!(opts.platforms, vec!["Android", "web"]);
    }

    #[test]
    fn option_order_is_the_same_with_or_without_injection() {
        let records = vec![
            record("2024-01-10", "beta", "Login", "Web", "No"),
            record("2024-01-10", "Zeta", "Login", "Web", "No"),
            record("2024-01-10", "Alpha", "Login", "Web", "No"),
        ];
        let plain = CategoryOptions::from_records(&records);
        assert_eq!(plain.banners, vec!["Alpha", "beta", "Zeta"]);

        let mut sel = inputs("01/01/2024", "31/01/2024");
        sel.banner = "gamma".into();
        let injected = CategoryOptions::from_records(&records).with_selected(&sel);
        assert_eq!(injected.banners, vec!["Alpha", "beta", "gamma", "Zeta"]);
    }

    #[test]
    fn selected_values_survive_reload() {
        let records = vec![record("2024-01-10", "Acme", "Login", "Web", "No")];
        let mut sel = inputs("01/01/2024", "31/01/2024");
        sel.banner = "Globex".into();
        sel.platform = "WEB".into();

        let opts = CategoryOptions::from_records(&records).with_selected(&sel);
        assert_eq!(opts.banners, vec!["Acme", "Globex"]);
        assert_eq!(opts.platforms, vec!["Web"]);
    }
}
