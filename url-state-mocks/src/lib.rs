//! url-state mocks
//!
//! A one-page web app that renders the animal/color controls through
//! `use_url_state`. Click around and watch the address bar.

pub mod controls;

use controls::ControlsMock;
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    rsx! {
        div { class: "min-h-screen bg-gray-900 text-white p-6",
            ControlsMock { title: "Controls".to_string() }
        }
    }
}
