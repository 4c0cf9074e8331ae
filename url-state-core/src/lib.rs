//! Keep a component's state mirrored in the address bar's query string.
//!
//! The pieces are framework-free: a [`Location`] to read and replace the
//! current query, a [`QueryCodec`] to turn it into a [`UrlState`] and back,
//! and a [`Connector`] that wraps a [`Component`] so the two stay in sync.

pub mod codec;
pub mod config;
pub mod connector;
pub mod location;
pub mod state;
pub mod sync;

pub use codec::{FnCodec, OpaqueCodec, QueryCodec, QueryStringCodec};
pub use config::{CodecKind, ConfigError, SyncConfig};
pub use connector::{
    connect, Component, ConnectedComponent, Connector, UrlStateProps, UrlStateSetter,
};
pub use location::{Location, LocationError, MemoryLocation};
pub use state::{PartialUrlState, UrlState};
pub use sync::{SyncError, UrlStateSync};
