//! `use_url_state` hook

use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::error;
use url_state_core::{Location, PartialUrlState, QueryCodec, SyncError, UrlState, UrlStateSync};

/// URL state for one component instance
#[derive(Clone, Copy, PartialEq)]
pub struct UrlStateHandle {
    state: Signal<UrlState>,
    setter: Callback<PartialUrlState>,
}

impl UrlStateHandle {
    /// Current state (reads signal, creating subscription)
    pub fn url_state(&self) -> UrlState {
        (*self.state.read()).clone()
    }

    /// Single value (reads signal, creating subscription)
    pub fn get(&self, key: &str) -> Option<String> {
        self.state.read().get(key).map(str::to_string)
    }

    /// Merge `partial` into the state and replace the location
    pub fn set_url_state(&self, partial: PartialUrlState) {
        self.setter.call(partial);
    }

    /// The setter as a callback, for passing down as a prop
    pub fn setter(&self) -> Callback<PartialUrlState> {
        self.setter
    }
}

/// Sync this component's state with a location's query string.
///
/// Mounts once per component instance: `codec` and `location` are built
/// then, and `initial()` supplies defaults for keys the query does not
/// carry. The location is normalized if any were missing.
pub fn use_url_state<L, C>(
    codec: impl FnOnce() -> C,
    initial: impl FnOnce() -> UrlState,
    location: impl FnOnce() -> L,
) -> UrlStateHandle
where
    L: Location + 'static,
    C: QueryCodec + 'static,
{
    let sync = use_hook(move || {
        let mut sync = UrlStateSync::new(location(), codec());
        if let Err(e) = sync.mount(initial) {
            error!("Failed to sync URL state on mount: {e}");
        }
        Rc::new(RefCell::new(sync))
    });

    let mut state = use_signal({
        let sync = sync.clone();
        move || sync.borrow().state().clone()
    });

    use_drop({
        let sync = sync.clone();
        move || sync.borrow_mut().unmount()
    });

    let setter = use_callback(move |partial: PartialUrlState| {
        match apply_update(&*sync, partial) {
            Ok(Some(next)) => state.set(next),
            Ok(None) => {}
            Err(e) => error!("Failed to write URL state: {e}"),
        }
    });

    UrlStateHandle { state, setter }
}

/// Run an update; `Some` carries the new state only when it changed.
fn apply_update<L, C>(
    sync: &RefCell<UrlStateSync<L, C>>,
    partial: PartialUrlState,
) -> Result<Option<UrlState>, SyncError>
where
    L: Location,
    C: QueryCodec,
{
    let mut sync = sync.borrow_mut();
    let before = sync.revision();
    let next = sync.update(partial)?.clone();
    Ok((sync.revision() != before).then_some(next))
}
