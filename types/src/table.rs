//! Table body model: column sets, rendered rows, placeholders and sorting.
//!
//! The renderer never looks at records directly. It receives a [`TableBody`]
//! that is either data rows for the active [`ColumnSet`] or exactly one
//! placeholder.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::formatting::format_metric;
use crate::record::{EventRecord, Metric};

pub const NO_RESULTS_TEXT: &str = "No results for selected filters";
pub const LOAD_ERROR_TEXT: &str = "Error loading data";

/// One displayable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    EventName,
    Banner,
    Platform,
    Anomaly,
    HealthScore,
    EventImportance,
    PlatformCoverage,
    EventHits,
    CompletenessScore,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::EventName => "Event",
            Column::Banner => "Banner",
            Column::Platform => "Platform",
            Column::Anomaly => "Anomaly",
            Column::HealthScore => "Health Score",
            Column::EventImportance => "Importance",
            Column::PlatformCoverage => "Platform Coverage",
            Column::EventHits => "Event Hits",
            Column::CompletenessScore => "Completeness",
        }
    }

    /// CSS class for header and body cells
    pub fn class(&self) -> &'static str {
        match self {
            Column::Date => "col-date",
            Column::EventName => "col-event",
            Column::Banner => "col-banner",
            Column::Platform => "col-platform",
            Column::Anomaly => "col-anomaly",
            Column::HealthScore
            | Column::EventImportance
            | Column::PlatformCoverage
            | Column::EventHits
            | Column::CompletenessScore => "col-metric",
        }
    }

    fn cell(&self, record: &EventRecord, european: bool) -> Cell {
        match self {
            Column::Date => Cell::text(&record.timestamp),
            Column::EventName => Cell::text(&record.event_name),
            Column::Banner => Cell::text(&record.banner),
            Column::Platform => Cell::text(&record.platform),
            Column::Anomaly => Cell::text(&record.anomaly_detected),
            Column::HealthScore => Cell::metric(&record.health_score, european),
            Column::EventImportance => Cell::metric(&record.event_importance, european),
            Column::PlatformCoverage => Cell::metric(&record.platform_coverage, european),
            Column::EventHits => Cell::metric(&record.event_hits, european),
            Column::CompletenessScore => Cell::metric(&record.completeness_score, european),
        }
    }
}

/// The two table layouts the page has shipped with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSet {
    /// Event, banner, anomaly flag and the five metrics
    #[default]
    Summary,
    /// Summary plus date and platform
    Detailed,
}

impl ColumnSet {
    pub fn columns(&self) -> &'static [Column] {
        match self {
            ColumnSet::Summary => &[
                Column::EventName,
                Column::Banner,
                Column::Anomaly,
                Column::HealthScore,
                Column::EventImportance,
                Column::PlatformCoverage,
                Column::EventHits,
                Column::CompletenessScore,
            ],
            ColumnSet::Detailed => &[
                Column::Date,
                Column::EventName,
                Column::Banner,
                Column::Platform,
                Column::Anomaly,
                Column::HealthScore,
                Column::EventImportance,
                Column::PlatformCoverage,
                Column::EventHits,
                Column::CompletenessScore,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.columns().len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns().is_empty()
    }

    /// Project a record onto this column set.
    pub fn row(&self, record: &EventRecord, european: bool) -> RowView {
        RowView {
            cells: self.columns().iter().map(|c| c.cell(record, european)).collect(),
        }
    }
}

/// A rendered cell: display text plus an optional numeric sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub number: Option<f64>,
}

impl Cell {
    fn text(s: &str) -> Self {
        Self {
            text: s.to_string(),
            number: None,
        }
    }

    fn metric(m: &Metric, european: bool) -> Self {
        Self {
            text: format_metric(m, european),
            number: m.as_f64(),
        }
    }

    /// Ascending order: numbers, then text (case-insensitive), then empty cells.
    fn compare(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) if !other.text.is_empty() => Ordering::Less,
            (None, Some(_)) if !self.text.is_empty() => Ordering::Greater,
            _ => match (self.text.is_empty(), other.text.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.text.to_lowercase().cmp(&other.text.to_lowercase()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub cells: Vec<Cell>,
}

/// Why a single placeholder row stands in for the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NoResults,
    LoadError,
}

impl Placeholder {
    pub fn message(&self) -> &'static str {
        match self {
            Placeholder::NoResults => NO_RESULTS_TEXT,
            Placeholder::LoadError => LOAD_ERROR_TEXT,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Placeholder::NoResults => "table-placeholder",
            Placeholder::LoadError => "table-placeholder text-danger",
        }
    }
}

/// What the table body shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TableBody {
    /// Before the first load completes
    #[default]
    Loading,
    Rows(Vec<RowView>),
    Placeholder(Placeholder),
}

impl TableBody {
    /// Rows for a filtered set, or the no-results placeholder when it is empty.
    pub fn from_records(records: &[EventRecord], columns: ColumnSet, european: bool) -> Self {
        if records.is_empty() {
            return TableBody::Placeholder(Placeholder::NoResults);
        }
        TableBody::Rows(records.iter().map(|r| columns.row(r, european)).collect())
    }

    pub fn load_error() -> Self {
        TableBody::Placeholder(Placeholder::LoadError)
    }

    /// Number of data rows (placeholders count as zero).
    pub fn data_rows(&self) -> usize {
        match self {
            TableBody::Rows(rows) => rows.len(),
            _ => 0,
        }
    }

    /// Rows in display order for a sort state. Placeholders are unaffected.
    pub fn sorted_rows(&self, sort: Option<SortState>) -> Vec<RowView> {
        let TableBody::Rows(rows) = self else {
            return Vec::new();
        };
        let mut rows = rows.clone();
        if let Some(sort) = sort {
            sort.apply(&mut rows);
        }
        rows
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column index and direction the user sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: flip the direction on the active column, otherwise sort
    /// the clicked column ascending.
    pub fn toggle(current: Option<SortState>, column: usize) -> SortState {
        match current {
            Some(s) if s.column == column => SortState {
                column,
                direction: match s.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            },
            _ => SortState {
                column,
                direction: SortDirection::Asc,
            },
        }
    }

    /// Stable sort; out-of-range columns leave the order untouched.
    pub fn apply(&self, rows: &mut [RowView]) {
        let col = self.column;
        if rows.first().is_none_or(|r| col >= r.cells.len()) {
            return;
        }
        rows.sort_by(|a, b| {
            let cmp = a.cells[col].compare(&b.cells[col]);
            match self.direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });
    }

    /// CSS class for a header cell
    pub fn header_class(current: Option<SortState>, column: usize) -> &'static str {
        match current {
            Some(s) if s.column == column => match s.direction {
                SortDirection::Asc => "sortable sorted-asc",
                SortDirection::Desc => "sortable sorted-desc",
            },
            _ => "sortable",
        }
    }
}
