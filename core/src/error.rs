//! Error types for script and method parsing.
//!
//! # Design
//! Every variant is a configuration error: it can only arise while turning
//! startup arguments into a `Script` or `HttpMethod`. Once a `Responder` has
//! been built, no request can produce one of these.

use thiserror::Error;

/// Errors returned while parsing the scripted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The method token is not one the responder can be scripted for.
    #[error("unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),

    /// A response entry is empty or not an integer.
    #[error("invalid response entry {0:?}: expected an integer status code")]
    InvalidEntry(String),

    /// A response entry is an integer but neither `0` nor a final status
    /// the transport can send.
    #[error("status code {0} out of range: expected 0 or 200..=999")]
    OutOfRange(i64),
}
