//! Table renderer
//!
//! The only place table markup is produced. Takes a [`TableBody`] and draws
//! either its rows or a single placeholder row spanning every column.

use dioxus::prelude::*;

use crate::types::{ColumnSet, SortState, TableBody};

#[derive(Props, Clone, PartialEq)]
pub struct TableViewProps {
    pub columns: ColumnSet,
    pub body: TableBody,
    /// Header-click sort, `None` keeps document order
    pub sort: Signal<Option<SortState>>,
}

#[component]
pub fn TableView(props: TableViewProps) -> Element {
    let mut sort = props.sort;
    let current_sort = *sort.read();
    let columns = props.columns.columns();
    let span = columns.len();
    let rows = props.body.sorted_rows(current_sort);

    rsx! {
        div { class: "table-container",
            table { id: "dataTable", class: "data-table",
                thead {
                    tr {
                        for (idx, col) in columns.iter().enumerate() {
                            th {
                                key: "{idx}",
                                class: "{col.class()} {SortState::header_class(current_sort, idx)}",
                                onclick: move |_| {
                                    let next = SortState::toggle(*sort.peek(), idx);
                                    sort.set(Some(next));
                                },
                                "{col.label()}"
                            }
                        }
                    }
                }
                tbody { id: "table-body",
                    match &props.body {
                        TableBody::Loading => rsx! {
                            tr {
                                td { colspan: "{span}", class: "table-placeholder", "Loading..." }
                            }
                        },
                        TableBody::Placeholder(placeholder) => rsx! {
                            tr {
                                td { colspan: "{span}", class: placeholder.class(), "{placeholder.message()}" }
                            }
                        },
                        TableBody::Rows(_) => rsx! {
                            for (i, row) in rows.iter().enumerate() {
                                tr { key: "{i}",
                                    for (c, cell) in row.cells.iter().enumerate() {
                                        td { key: "{c}", class: columns[c].class(), "{cell.text}" }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
