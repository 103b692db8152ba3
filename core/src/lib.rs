//! Scripted HTTP response engine.
//!
//! # Overview
//! Given a target method and an ordered script of outcomes, decides what each
//! inbound request gets: the next scripted status (with a fixture body for
//! successes), an abrupt disconnect, a liveness 200, or a 404. No networking
//! happens here; the transport maps requests in and writes `Rendered` values
//! out.
//!
//! # Design
//! - `Script` parsing is the only place the `0` sentinel exists; everything
//!   downstream sees `Outcome::Terminate`.
//! - `Sequencer` is the only shared mutable state and serializes cursor
//!   advancement behind a mutex.
//! - `render` and `reason_phrase` are pure functions.

pub mod error;
pub mod http;
pub mod outcome;
pub mod render;
pub mod responder;
pub mod sequencer;
pub mod status;

pub use error::ScriptError;
pub use http::HttpMethod;
pub use outcome::{Outcome, Script, Status};
pub use render::{render, Payload, Rendered, Reply, JSON_CONTENT_TYPE};
pub use responder::{Responder, HEALTH_PATH};
pub use sequencer::{Draw, Sequencer, EMPTY_SCRIPT_OUTCOME};
pub use status::reason_phrase;
