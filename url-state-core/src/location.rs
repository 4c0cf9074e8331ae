//! Where the query string lives

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to replace location: {0}")]
    Write(String),
}

/// Read and replace the current history entry's query. Writes never push a
/// new history entry.
pub trait Location {
    /// Current query without its leading `?`.
    fn query(&self) -> String;

    /// Replace the current entry's query. `query` has no leading `?`; an
    /// empty string clears the query.
    fn replace_query(&self, query: &str) -> Result<(), LocationError>;
}

impl<L: Location + ?Sized> Location for Rc<L> {
    fn query(&self) -> String {
        (**self).query()
    }

    fn replace_query(&self, query: &str) -> Result<(), LocationError> {
        (**self).replace_query(query)
    }
}

#[derive(Debug, Default)]
struct MemoryLocationInner {
    query: String,
    writes: Vec<String>,
}

/// In-memory location for tests and hosts without a browser.
///
/// Clones share the same entry, so a test can keep a handle while the
/// connector owns another. Every [`replace_query`](Location::replace_query)
/// is recorded.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocation {
    inner: Rc<RefCell<MemoryLocationInner>>,
}

impl MemoryLocation {
    pub fn new(query: &str) -> Self {
        let location = Self::default();
        location.set_query(query);
        location
    }

    /// Navigate to `query` without recording it as a replace write.
    pub fn set_query(&self, query: &str) {
        self.inner.borrow_mut().query = query.strip_prefix('?').unwrap_or(query).to_string();
    }

    /// Queries written through `replace_query`, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.inner.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes.len()
    }

    /// `?query`, or empty when there is no query, as `window.location.search`
    /// reports it.
    pub fn search(&self) -> String {
        let inner = self.inner.borrow();
        if inner.query.is_empty() {
            String::new()
        } else {
            format!("?{}", inner.query)
        }
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.inner.borrow().query.clone()
    }

    fn replace_query(&self, query: &str) -> Result<(), LocationError> {
        let mut inner = self.inner.borrow_mut();
        inner.query = query.to_string();
        inner.writes.push(query.to_string());
        Ok(())
    }
}
