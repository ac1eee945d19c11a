//! Filter controls: date range pickers and the four category selectors.

use dioxus::prelude::*;

use crate::types::{ALL, AnomalyFilter, CategoryOptions, DateWindow, format_display};

#[derive(Props, Clone, PartialEq)]
pub struct FilterBarProps {
    pub start: Signal<String>,
    pub end: Signal<String>,
    pub banner: Signal<String>,
    pub event: Signal<String>,
    pub platform: Signal<String>,
    pub anomaly: Signal<String>,
    pub options: CategoryOptions,
    /// Selectable date range; typed dates are clamped into it
    pub window: DateWindow,
    pub row_count: usize,
}

#[component]
pub fn FilterBar(props: FilterBarProps) -> Element {
    let mut start = props.start;
    let mut end = props.end;
    let mut banner = props.banner;
    let mut event = props.event;
    let mut platform = props.platform;
    let mut anomaly = props.anomaly;
    let window = props.window;

    let earliest = format_display(window.earliest);
    let latest = format_display(window.latest);
    let range_hint = format!("{earliest} to {latest}");

    rsx! {
        div { class: "table-filters",
            // Date range
            label { class: "filter-field",
                span { class: "filter-label", "From" }
                input {
                    id: "datepicker-start",
                    class: "date-input",
                    r#type: "text",
                    placeholder: "dd/mm/yyyy",
                    title: "{range_hint}",
                    value: "{start}",
                    onchange: move |e| start.set(window.normalize_display(&e.value())),
                }
            }
            label { class: "filter-field",
                span { class: "filter-label", "To" }
                input {
                    id: "datepicker-end",
                    class: "date-input",
                    r#type: "text",
                    placeholder: "dd/mm/yyyy",
                    title: "{range_hint}",
                    value: "{end}",
                    onchange: move |e| end.set(window.normalize_display(&e.value())),
                }
            }

            // Category selectors
            select {
                id: "dropdown1",
                class: "filter-select",
                value: "{banner}",
                onchange: move |e| banner.set(e.value()),
                option { value: ALL, "All Banners" }
                for name in props.options.banners.iter() {
                    option { key: "{name}", value: "{name}", "{name}" }
                }
            }
            select {
                id: "dropdown2",
                class: "filter-select",
                value: "{event}",
                onchange: move |e| event.set(e.value()),
                option { value: ALL, "All Events" }
                for name in props.options.events.iter() {
                    option { key: "{name}", value: "{name}", "{name}" }
                }
            }
            select {
                id: "dropdown3",
                class: "filter-select",
                value: "{platform}",
                onchange: move |e| platform.set(e.value()),
                option { value: ALL, "All Platforms" }
                for name in props.options.platforms.iter() {
                    option { key: "{name}", value: "{name}", "{name}" }
                }
            }
            select {
                id: "dropdown4",
                class: "filter-select",
                value: "{anomaly}",
                onchange: move |e| anomaly.set(e.value()),
                for choice in AnomalyFilter::all().iter() {
                    option { key: "{choice.label()}", value: choice.label(), "{choice.label()}" }
                }
            }

            span { class: "table-count", "{props.row_count} events" }
        }
    }
}
