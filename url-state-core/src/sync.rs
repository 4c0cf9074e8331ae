//! Mount/update engine shared by the connector and the UI hook

use crate::codec::QueryCodec;
use crate::location::{Location, LocationError};
use crate::state::{PartialUrlState, UrlState};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("URL state is not mounted")]
    NotMounted,
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Owns the in-memory copy of the URL state and keeps the location equal
/// to it after every call.
pub struct UrlStateSync<L, C> {
    location: L,
    codec: C,
    state: UrlState,
    mounted: bool,
    revision: u64,
}

impl<L: Location, C: QueryCodec> UrlStateSync<L, C> {
    pub fn new(location: L, codec: C) -> Self {
        Self {
            location,
            codec,
            state: UrlState::new(),
            mounted: false,
            revision: 0,
        }
    }

    /// Merge `initial()` under whatever the location already carries and
    /// write the result back if the query changed.
    ///
    /// Values already in the query win over defaults. `initial` is not
    /// called when already mounted.
    pub fn mount(&mut self, initial: impl FnOnce() -> UrlState) -> Result<&UrlState, SyncError> {
        if self.mounted {
            return Ok(&self.state);
        }

        let current = self.location.query();
        let parsed = self.codec.parse(&current);
        let mut merged = initial();
        merged.merge(parsed);

        let query = self.codec.stringify_onto(&merged, &current);
        if query != current {
            debug!("Normalizing query on mount: {current:?} -> {query:?}");
            self.location.replace_query(&query)?;
        }

        self.state = merged;
        self.mounted = true;
        self.revision += 1;
        Ok(&self.state)
    }

    /// Shallow-merge `partial` into the current state and replace the
    /// location with the result.
    ///
    /// The location is written even when nothing changed; the revision only
    /// moves when the state does.
    pub fn update(&mut self, partial: PartialUrlState) -> Result<&UrlState, SyncError> {
        if !self.mounted {
            return Err(SyncError::NotMounted);
        }

        let next = self.state.merged(&partial);
        let query = self.codec.stringify_onto(&next, &self.location.query());
        debug!("Replacing query: {query:?}");
        self.location.replace_query(&query)?;

        if next != self.state {
            self.state = next;
            self.revision += 1;
        }
        Ok(&self.state)
    }

    /// Stop syncing. Later updates fail with [`SyncError::NotMounted`]; the
    /// location keeps its last query.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn state(&self) -> &UrlState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Bumped on mount and on every update that changes the state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}
