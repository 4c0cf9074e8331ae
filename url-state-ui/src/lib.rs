//! Dioxus bindings for URL-synced component state

mod hooks;
mod location;

pub use hooks::{use_url_state, UrlStateHandle};
pub use location::WindowLocation;
pub use url_state_core::{PartialUrlState, UrlState};
