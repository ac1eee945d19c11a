//! UI Components
//!
//! The page is one panel: a filter bar above a sortable table. The panel owns
//! the load cycle; the other two components only render what they are given.

pub mod event_table;
pub mod filter_bar;
pub mod table_view;

pub use event_table::EventTablePanel;
pub use filter_bar::FilterBar;
pub use table_view::TableView;
