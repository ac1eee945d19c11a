//! Event table panel: owns the filter signals and the load-and-render cycle.
//!
//! Every change to a filter control re-runs one effect, which snapshots the
//! controls, fetches the document, filters it and replaces the table body.

use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_logger::tracing::{debug, error, info, warn};

use crate::api;
use crate::components::{FilterBar, TableView};
use crate::types::{
    ALL, CategoryOptions, DateWindow, FilterInputs, FilterSelection, LoadSequencer, SortState,
    TableBody, TableConfig, UNSPECIFIED, apply_filter, format_display,
};

#[derive(Props, Clone, PartialEq)]
pub struct EventTablePanelProps {
    pub config: TableConfig,
    /// Date the picker window is anchored to
    pub today: NaiveDate,
}

#[component]
pub fn EventTablePanel(props: EventTablePanelProps) -> Element {
    let window = DateWindow::from_config(props.today, &props.config.window);
    let columns = props.config.columns;
    let european = props.config.european_numbers;
    let data_url = props.config.data_url.clone();

    // Filter controls, pre-seeded so the first load has a date range
    let start = use_signal(|| format_display(window.default_start));
    let end = use_signal(|| format_display(window.default_end));
    let banner = use_signal(|| ALL.to_string());
    let event = use_signal(|| ALL.to_string());
    let platform = use_signal(|| ALL.to_string());
    let anomaly = use_signal(|| UNSPECIFIED.to_string());

    // Table state
    let mut body = use_signal(TableBody::default);
    let mut options = use_signal(CategoryOptions::default);
    let mut sequencer = use_signal(LoadSequencer::new);
    let sort = use_signal(|| None::<SortState>);

    // Filters changed: reading every control here subscribes the effect to all of them
    use_effect(move || {
        let inputs = FilterInputs {
            start: start.read().clone(),
            end: end.read().clone(),
            banner: banner.read().clone(),
            event: event.read().clone(),
            platform: platform.read().clone(),
            anomaly: anomaly.read().clone(),
        };

        // Taken before validating so an aborted trigger still supersedes any
        // load already in flight
        let ticket = sequencer.write().begin();

        let selection = match FilterSelection::from_inputs(&inputs, Some(&window)) {
            Ok(Some(selection)) => selection,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed date filter");
                return;
            }
        };

        let url = data_url.clone();

        spawn(async move {
            debug!(url = %url, from = %selection.from, to = %selection.to, "Loading event data");
            let result = api::fetch_records(&url).await;

            // A newer load has started since this one; let it render instead
            if !sequencer.peek().is_current(ticket) {
                debug!("Dropping stale event data response");
                return;
            }

            match result {
                Ok(records) => {
                    options.set(CategoryOptions::from_records(&records).with_selected(&inputs));
                    let outcome = apply_filter(&records, &selection);
                    info!(
                        total = records.len(),
                        matched = outcome.rows.len(),
                        skipped = outcome.skipped,
                        "Filtered event data"
                    );
                    body.set(TableBody::from_records(&outcome.rows, columns, european));
                }
                Err(e) => {
                    error!(error = %e, url = %url, "Error loading event data");
                    body.set(TableBody::load_error());
                }
            }
        });
    });

    let row_count = body.read().data_rows();

    rsx! {
        div { class: "event-table-panel",
            FilterBar {
                start,
                end,
                banner,
                event,
                platform,
                anomaly,
                options: options.read().clone(),
                window,
                row_count,
            }
            TableView {
                columns,
                body: body.read().clone(),
                sort,
            }
        }
    }
}
