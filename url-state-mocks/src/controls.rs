//! Animal/color controls wired to the address bar

use dioxus::prelude::*;
use tracing::warn;
use url_state_core::{QueryCodec, SyncConfig, UrlState};
use url_state_ui::{use_url_state, WindowLocation};

const SYNC_CONFIG: &str = include_str!("../sync.yaml");

const ANIMALS: [&str; 3] = ["Ant", "Bee", "Cat"];
const COLORS: [&str; 3] = ["Blue", "Green", "Red"];

const SELECTED_CLASS: &str = "px-3 py-1.5 text-sm rounded bg-blue-600 text-white";
const UNSELECTED_CLASS: &str =
    "px-3 py-1.5 text-sm rounded bg-gray-700 text-gray-300 hover:bg-gray-600";

/// Defaults for keys the URL doesn't carry yet
pub fn initial_controls() -> UrlState {
    UrlState::from([("animal", "Ant"), ("color", "Blue")])
}

fn sync_config() -> SyncConfig {
    SyncConfig::from_yaml_str(SYNC_CONFIG).unwrap_or_else(|e| {
        warn!("Using default URL sync config: {e}");
        SyncConfig::default()
    })
}

/// Codec named by the bundled config
pub fn controls_codec() -> Box<dyn QueryCodec> {
    sync_config().codec()
}

/// Controls connected to `window.location`
#[component]
pub fn ControlsMock(title: String) -> Element {
    let url_state = use_url_state(controls_codec, initial_controls, WindowLocation::new);

    rsx! {
        UrlBasedControls {
            title,
            url_state: url_state.url_state(),
            set_url_state: url_state.setter(),
        }
    }
}

/// Presentational controls; knows nothing about the URL
#[component]
pub fn UrlBasedControls(
    title: String,
    url_state: UrlState,
    set_url_state: Callback<UrlState>,
) -> Element {
    let animal = url_state.get("animal").unwrap_or_default().to_string();
    let color = url_state.get("color").unwrap_or_default().to_string();

    rsx! {
        div { class: "max-w-4xl mx-auto",
            h1 { class: "text-lg font-semibold mb-4", "{title}" }
            div { class: "flex gap-4 mb-4 text-sm text-gray-400",
                div { class: "currentAnimal", "{animal}" }
                div { class: "currentColor", "{color}" }
            }
            div { class: "flex flex-wrap gap-2 mb-3",
                for value in ANIMALS {
                    button {
                        key: "{value}",
                        class: if value == animal { SELECTED_CLASS } else { UNSELECTED_CLASS },
                        onclick: move |_| set_url_state.call(UrlState::from([("animal", value)])),
                        "{value}"
                    }
                }
            }
            div { class: "flex flex-wrap gap-2",
                for value in COLORS {
                    button {
                        key: "{value}",
                        class: if value == color { SELECTED_CLASS } else { UNSELECTED_CLASS },
                        onclick: move |_| set_url_state.call(UrlState::from([("color", value)])),
                        "{value}"
                    }
                }
            }
        }
    }
}
