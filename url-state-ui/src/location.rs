//! Browser location backed by `window.location` and `window.history`

use url_state_core::{Location, LocationError};
use wasm_bindgen::JsValue;

/// The page's own address bar. Writes go through `history.replaceState`,
/// keeping the path, fragment and history state intact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowLocation;

impl WindowLocation {
    pub fn new() -> Self {
        Self
    }

    fn window() -> Result<web_sys::Window, LocationError> {
        web_sys::window().ok_or_else(|| LocationError::Unavailable("no window".to_string()))
    }
}

impl Location for WindowLocation {
    fn query(&self) -> String {
        let Ok(window) = Self::window() else {
            return String::new();
        };
        let search = window.location().search().unwrap_or_default();
        search.strip_prefix('?').unwrap_or(&search).to_string()
    }

    fn replace_query(&self, query: &str) -> Result<(), LocationError> {
        let window = Self::window()?;
        let location = window.location();
        let path = location
            .pathname()
            .map_err(|e| LocationError::Unavailable(format!("{e:?}")))?;
        let hash = location.hash().unwrap_or_default();

        let history = window
            .history()
            .map_err(|e| LocationError::Unavailable(format!("{e:?}")))?;
        let state = history.state().unwrap_or(JsValue::NULL);

        history
            .replace_state_with_url(&state, "", Some(&relative_url(&path, query, &hash)))
            .map_err(|e| LocationError::Write(format!("{e:?}")))
    }
}

/// `path?query#hash`, leaving out the `?` when the query is empty.
fn relative_url(path: &str, query: &str, hash: &str) -> String {
    if query.is_empty() {
        format!("{path}{hash}")
    } else {
        format!("{path}?{query}{hash}")
    }
}
