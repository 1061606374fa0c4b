//! Core data types for redirect-chain resolution.

use std::fmt;

use serde::{Serialize, Serializer};

/// One fetch attempt in a redirect chain.
///
/// Hops are append-only: once recorded they are never mutated, and their
/// order in the chain is chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    /// The URL that was attempted.
    pub url: String,
    /// The HTTP status code, or `None` if the request never produced a response.
    pub status: Option<u16>,
    /// Description of the transport failure, if the request errored out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The raw, unresolved `Location` header value, if one was present.
    pub location: Option<String>,
}

impl Hop {
    /// Records a hop whose request failed before producing a response.
    pub fn errored(url: &str, error: &str) -> Self {
        Self {
            url: url.to_string(),
            status: None,
            error: Some(error.to_string()),
            location: None,
        }
    }
}

/// Advisory note attached to a soft termination.
///
/// Soft terminations are reported as success with a note rather than as an
/// error, since a best-effort final answer is still meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    /// The `Location` header could not be resolved against the current URL.
    MalformedLocation,
    /// The next redirect target was already visited earlier in the chain.
    LoopDetected,
    /// The configured hop cap was reached while still being redirected.
    HopCapReached(usize),
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::MalformedLocation => f.write_str("malformed Location header; stopped following"),
            Note::LoopDetected => f.write_str("redirect loop detected; stopped"),
            Note::HopCapReached(hops) => write!(f, "stopped after {hops} hops"),
        }
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Terminal outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The final destination URL.
    pub final_url: String,
    /// The status code of the final response.
    pub final_status: u16,
    /// Every hop attempted, in chronological order.
    pub chain: Vec<Hop>,
    /// Advisory note when the resolution stopped early (loop, hop cap,
    /// malformed redirect target).
    pub note: Option<Note>,
}
