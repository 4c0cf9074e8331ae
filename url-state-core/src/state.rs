//! The key/value map mirrored between a component and the query string

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// Flat string map held by a URL-connected component.
///
/// Query strings only carry strings, so values are kept as `String` and
/// interpreted on read (`get_bool`, `get_parsed`). Keys are ordered, which
/// keeps stringified queries stable across writes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlState(BTreeMap<String, String>);

/// A subset of keys to shallow-merge into a [`UrlState`].
pub type PartialUrlState = UrlState;

impl UrlState {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// `"1"` and `"true"` read as true, anything else as false.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).map(|v| v == "1" || v == "true")
    }

    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, if value { "1" } else { "0" });
    }

    pub fn set_display<T: Display>(&mut self, key: impl Into<String>, value: T) {
        self.insert(key, value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Shallow merge: every key in `other` overwrites, keys absent from
    /// `other` are left as they are.
    pub fn merge(&mut self, other: PartialUrlState) {
        self.0.extend(other.0);
    }

    /// Like [`merge`](Self::merge) but returns a new map.
    pub fn merged(&self, other: &PartialUrlState) -> UrlState {
        let mut next = self.clone();
        next.0
            .extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        next
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for UrlState {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for UrlState {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for UrlState {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a UrlState {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
