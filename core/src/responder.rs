//! Per-request routing into the scripted sequence.
//!
//! # Design
//! `Responder` owns the target method and the `Sequencer`; the transport holds
//! it behind an `Arc` and calls [`Responder::respond`] for every request. Three
//! routes, checked in order:
//!
//! 1. `GET /health` always answers 200 with no body and never touches the
//!    script.
//! 2. The target method draws the next outcome and renders it.
//! 3. Anything else answers 404 with no body, leaving the script untouched.

use tracing::debug;

use crate::http::HttpMethod;
use crate::outcome::{Script, Status};
use crate::render::{render, Rendered, Reply};
use crate::sequencer::Sequencer;

/// Liveness-check path. Matched exactly, query strings included.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug)]
pub struct Responder {
    target: HttpMethod,
    sequencer: Sequencer,
}

impl Responder {
    pub fn new(target: HttpMethod, script: Script) -> Self {
        Self {
            target,
            sequencer: Sequencer::new(script),
        }
    }

    pub fn target(&self) -> HttpMethod {
        self.target
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Response for a request to `path` (query included). `method` is `None`
    /// when the transport saw a method `HttpMethod` cannot represent; such
    /// requests are never scripted.
    pub fn respond(&self, method: Option<HttpMethod>, path: &str) -> Rendered {
        if method == Some(HttpMethod::Get) && path == HEALTH_PATH {
            return Rendered::Reply(Reply::empty(Status::OK));
        }

        if method != Some(self.target) {
            debug!(?method, path, "method not scripted");
            return Rendered::Reply(Reply::empty(Status::NOT_FOUND));
        }

        let draw = self.sequencer.draw();
        debug!(
            method = %self.target,
            path,
            outcome = %draw.outcome,
            index = ?draw.index,
            exhausted = draw.exhausted,
            "scripted response"
        );
        render(draw.outcome, path)
    }
}
