//! Frontend type definitions
//!
//! Re-exports from evtable-types so components import from one place.

pub use evtable_types::dates::format_display;
pub use evtable_types::filter::{ALL, UNSPECIFIED};
pub use evtable_types::{
    AnomalyFilter, CategoryOptions, ColumnSet, DateWindow, EventRecord, FilterInputs,
    FilterSelection, LoadError, LoadSequencer, SortState, TableBody, TableConfig, apply_filter,
    parse_records,
};
