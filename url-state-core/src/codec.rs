//! Query string <-> [`UrlState`] codecs
//!
//! `parse` is total: input it cannot make sense of comes back as an empty
//! state rather than an error, so a hand-edited URL never breaks a page.

use crate::state::UrlState;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::collections::BTreeMap;
use tracing::warn;

/// Parameter the opaque codec stores its payload under unless configured
/// otherwise.
pub const DEFAULT_STATE_PARAM: &str = "state";

/// A parse/stringify pair. Implementations must round-trip:
/// `parse(&stringify(s)) == s` for any state built from plain strings.
pub trait QueryCodec {
    /// Parse a query (with or without its leading `?`).
    fn parse(&self, query: &str) -> UrlState;

    /// Render a state as a query, without a leading `?`.
    fn stringify(&self, state: &UrlState) -> String;

    /// Query to write when `state` replaces `current`. Codecs that own only
    /// part of the query keep the rest of `current` here.
    fn stringify_onto(&self, state: &UrlState, _current: &str) -> String {
        self.stringify(state)
    }
}

impl<C: QueryCodec + ?Sized> QueryCodec for Box<C> {
    fn parse(&self, query: &str) -> UrlState {
        (**self).parse(query)
    }

    fn stringify(&self, state: &UrlState) -> String {
        (**self).stringify(state)
    }

    fn stringify_onto(&self, state: &UrlState, current: &str) -> String {
        (**self).stringify_onto(state, current)
    }
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

/// Plain `key=value&key=value` form encoding, one parameter per key.
///
/// Keys come out sorted. When a key repeats, the last value wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryStringCodec;

impl QueryCodec for QueryStringCodec {
    fn parse(&self, query: &str) -> UrlState {
        let query = strip_question_mark(query);
        if query.is_empty() {
            return UrlState::new();
        }

        match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => pairs.into_iter().collect(),
            Err(e) => {
                warn!("Ignoring undecodable query string {query:?}: {e}");
                UrlState::new()
            }
        }
    }

    fn stringify(&self, state: &UrlState) -> String {
        serde_urlencoded::to_string(state.as_map()).expect("string map is always serializable")
    }
}

/// Whole state as base64url JSON under a single query parameter.
///
/// Keeps URLs opaque. Only `param` belongs to this codec: other parameters
/// in the current query are carried through every write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueCodec {
    param: String,
}

impl OpaqueCodec {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    fn encode(&self, state: &UrlState) -> String {
        let json = serde_json::to_string(state).expect("string map is always serializable");
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    fn decode(&self, encoded: &str) -> Option<UrlState> {
        let json_bytes = match URL_SAFE_NO_PAD.decode(encoded) {
            Ok(b) => b,
            Err(e) => {
                warn!("Ignoring {}= value that is not base64url: {e}", self.param);
                return None;
            }
        };

        match serde_json::from_slice::<BTreeMap<String, String>>(&json_bytes) {
            Ok(map) => Some(map.into()),
            Err(e) => {
                warn!("Ignoring {}= value that is not a string map: {e}", self.param);
                None
            }
        }
    }
}

impl Default for OpaqueCodec {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_PARAM)
    }
}

impl QueryCodec for OpaqueCodec {
    fn parse(&self, query: &str) -> UrlState {
        let query = strip_question_mark(query);
        if query.is_empty() {
            return UrlState::new();
        }

        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!("Ignoring undecodable query string {query:?}: {e}");
                return UrlState::new();
            }
        };

        pairs
            .into_iter()
            .rev()
            .find(|(k, _)| *k == self.param)
            .and_then(|(_, v)| self.decode(&v))
            .unwrap_or_default()
    }

    fn stringify(&self, state: &UrlState) -> String {
        if state.is_empty() {
            return String::new();
        }

        format!("{}={}", self.param, self.encode(state))
    }

    fn stringify_onto(&self, state: &UrlState, current: &str) -> String {
        let current = strip_question_mark(current);
        let mut pairs: Vec<(String, String)> = if current.is_empty() {
            Vec::new()
        } else {
            match serde_urlencoded::from_str(current) {
                Ok(pairs) => pairs,
                Err(e) => {
                    warn!("Dropping undecodable query string {current:?}: {e}");
                    Vec::new()
                }
            }
        };
        pairs.retain(|(k, _)| *k != self.param);

        if pairs.is_empty() {
            return self.stringify(state);
        }
        if !state.is_empty() {
            pairs.push((self.param.clone(), self.encode(state)));
        }
        serde_urlencoded::to_string(&pairs).expect("string pairs are always serializable")
    }
}

/// Adapts a pair of closures into a [`QueryCodec`].
#[derive(Clone)]
pub struct FnCodec<P, S> {
    parse: P,
    stringify: S,
}

impl<P, S> FnCodec<P, S>
where
    P: Fn(&str) -> UrlState,
    S: Fn(&UrlState) -> String,
{
    pub fn new(parse: P, stringify: S) -> Self {
        Self { parse, stringify }
    }
}

impl<P, S> QueryCodec for FnCodec<P, S>
where
    P: Fn(&str) -> UrlState,
    S: Fn(&UrlState) -> String,
{
    fn parse(&self, query: &str) -> UrlState {
        (self.parse)(query)
    }

    fn stringify(&self, state: &UrlState) -> String {
        (self.stringify)(state)
    }
}
