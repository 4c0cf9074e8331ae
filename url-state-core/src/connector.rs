//! Higher-order wrapper that connects a component to the query string
//!
//! ```
//! use url_state_core::{connect, Component, MemoryLocation, QueryCodec, QueryStringCodec, UrlState, UrlStateProps};
//!
//! struct Color;
//!
//! impl Component for Color {
//!     type Props = ();
//!     type Output = String;
//!
//!     fn render(&self, props: UrlStateProps<'_, ()>) -> String {
//!         props.url_state.get("color").unwrap_or_default().to_string()
//!     }
//! }
//!
//! let location = MemoryLocation::new("color=Blue");
//! let connected = connect(
//!     |q: &str| QueryStringCodec.parse(q),
//!     |s: &UrlState| QueryStringCodec.stringify(s),
//!     || UrlState::from([("color", "Red")]),
//! )
//! .wrap(Color, location);
//!
//! connected.on_mount().unwrap();
//! assert_eq!(connected.render(&()), "Blue");
//! ```

use crate::codec::{FnCodec, QueryCodec};
use crate::location::Location;
use crate::state::{PartialUrlState, UrlState};
use crate::sync::{SyncError, UrlStateSync};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A presentational component rendered with URL state injected.
pub trait Component {
    /// Props the connected component forwards unchanged.
    type Props;
    type Output;

    fn render(&self, props: UrlStateProps<'_, Self::Props>) -> Self::Output;
}

/// What a wrapped component receives on each render.
pub struct UrlStateProps<'a, P> {
    pub url_state: UrlState,
    pub set_url_state: UrlStateSetter,
    pub props: &'a P,
}

/// Merges a partial state into the connected component and rewrites the
/// location. Cheap to clone; hand it to event handlers.
#[derive(Clone)]
pub struct UrlStateSetter {
    apply: Rc<dyn Fn(PartialUrlState) -> Result<(), SyncError>>,
}

impl UrlStateSetter {
    /// The location is replaced before this returns.
    pub fn set(&self, partial: PartialUrlState) -> Result<(), SyncError> {
        (self.apply)(partial)
    }
}

impl fmt::Debug for UrlStateSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlStateSetter").finish_non_exhaustive()
    }
}

/// Build a connector from a parse/stringify pair and an initial-state
/// factory.
pub fn connect<P, S, I>(parse: P, stringify: S, initial: I) -> Connector<FnCodec<P, S>, I>
where
    P: Fn(&str) -> UrlState + 'static,
    S: Fn(&UrlState) -> String + 'static,
    I: Fn() -> UrlState,
{
    Connector::with_codec(FnCodec::new(parse, stringify), initial)
}

/// Codec plus defaults, ready to wrap components.
#[derive(Clone)]
pub struct Connector<C, I> {
    codec: C,
    initial: I,
}

impl<C, I> Connector<C, I>
where
    C: QueryCodec + 'static,
    I: Fn() -> UrlState,
{
    pub fn with_codec(codec: C, initial: I) -> Self {
        Self { codec, initial }
    }

    /// Wrap `component`, syncing against `location`. Nothing is read or
    /// written until [`ConnectedComponent::on_mount`].
    pub fn wrap<W, L>(self, component: W, location: L) -> ConnectedComponent<W, L, C, I>
    where
        W: Component,
        L: Location + 'static,
    {
        ConnectedComponent {
            component,
            initial: self.initial,
            sync: Rc::new(RefCell::new(UrlStateSync::new(location, self.codec))),
            rendered_revision: Cell::new(None),
        }
    }
}

/// A component whose state is mirrored in the location's query string.
pub struct ConnectedComponent<W, L, C, I> {
    component: W,
    initial: I,
    sync: Rc<RefCell<UrlStateSync<L, C>>>,
    rendered_revision: Cell<Option<u64>>,
}

impl<W, L, C, I> ConnectedComponent<W, L, C, I>
where
    W: Component,
    L: Location + 'static,
    C: QueryCodec + 'static,
    I: Fn() -> UrlState,
{
    /// Compute the starting state from the query and the defaults, and
    /// normalize the location if it was missing keys.
    pub fn on_mount(&self) -> Result<(), SyncError> {
        self.sync.borrow_mut().mount(&self.initial)?;
        Ok(())
    }

    /// Same as calling the setter handed to the wrapped component.
    pub fn on_update(&self, partial: PartialUrlState) -> Result<(), SyncError> {
        self.sync.borrow_mut().update(partial)?;
        Ok(())
    }

    pub fn on_unmount(&self) {
        self.sync.borrow_mut().unmount();
    }

    pub fn render(&self, props: &W::Props) -> W::Output {
        let (url_state, revision) = {
            let sync = self.sync.borrow();
            (sync.state().clone(), sync.revision())
        };
        self.rendered_revision.set(Some(revision));

        self.component.render(UrlStateProps {
            url_state,
            set_url_state: self.setter(),
            props,
        })
    }

    /// True when the state moved since the last [`render`](Self::render).
    pub fn needs_render(&self) -> bool {
        self.rendered_revision.get() != Some(self.sync.borrow().revision())
    }

    pub fn setter(&self) -> UrlStateSetter {
        let sync = Rc::clone(&self.sync);
        UrlStateSetter {
            apply: Rc::new(move |partial| {
                sync.borrow_mut().update(partial)?;
                Ok(())
            }),
        }
    }

    pub fn url_state(&self) -> UrlState {
        self.sync.borrow().state().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.sync.borrow().is_mounted()
    }

    pub fn component(&self) -> &W {
        &self.component
    }
}
