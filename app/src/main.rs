mod api;
mod components;
mod types;

use dioxus::prelude::*;
use dioxus_logger::tracing::Level;

use crate::components::EventTablePanel;
use crate::types::TableConfig;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const TABLE_CONFIG: &str = include_str!("../table.toml");

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| TableConfig::from_toml_or_default(TABLE_CONFIG));
    let today = use_hook(|| chrono::Local::now().date_naive());

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        main { class: "page",
            h1 { class: "page-title", "Event Health" }
            EventTablePanel { config, today }
        }
    }
}
