//! Shared types and pure logic for the evtable frontend.
//!
//! Everything here is platform-independent so it can be unit tested natively;
//! the wasm crate only wires these pieces to the DOM and to `fetch`.

pub mod config;
pub mod dates;
pub mod filter;
pub mod formatting;
pub mod load;
pub mod record;
pub mod table;

pub use config::{ConfigError, TableConfig, WindowConfig};
pub use dates::{DateParseError, DateWindow};
pub use filter::{
    AnomalyFilter, CategoryFilter, CategoryOptions, FilterInputs, FilterOutcome, FilterSelection,
    apply_filter,
};
pub use load::{LoadError, LoadSequencer, LoadTicket, parse_records};
pub use record::{EventRecord, Metric};
pub use table::{Cell, Column, ColumnSet, Placeholder, RowView, SortDirection, SortState, TableBody};
