//! Turning a scripted outcome into a response description.
//!
//! # Design
//! `render` produces plain data (`Rendered`), not bytes on a socket. The
//! transport decides how to write a `Reply` and how to drop a connection for
//! `Terminate`, which keeps this module deterministic and testable without a
//! listener.
//!
//! Bodies are only synthesized for 200 and 201. Which body depends on the
//! request path: enrollment clients call a `/register` endpoint and then a
//! `/config` endpoint, so those two get fixtures shaped like the real API.
//!
//! A 204 reply carries no `Content-Type` since no body can follow. Every other
//! scripted status gets `application/json`; 204 is intentionally not folded
//! into that rule.

use serde::Serialize;

use crate::outcome::{Outcome, Status};
use crate::status::reason_phrase;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Claim code returned for `/register` requests.
pub const TEST_CLAIM_CODE: &str = "TEST123";

/// What the transport should do with one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Abort the connection; no status line, headers, or body.
    Terminate,
    Reply(Reply),
}

/// A complete HTTP reply described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: Status,
    pub reason: &'static str,
    pub content_type: Option<&'static str>,
    pub body: Option<Payload>,
}

impl Reply {
    /// Headers-only reply with no content type.
    pub fn empty(status: Status) -> Self {
        Self {
            status,
            reason: reason_phrase(status.as_u16()),
            content_type: None,
            body: None,
        }
    }
}

/// JSON bodies the renderer can synthesize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Claim(ClaimCode),
    Config(ClientConfig),
    Ack(Ack),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimCode {
    pub claim_code: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientConfig {
    pub customer: Customer,
    pub pangolin: Pangolin,
    pub auth: Auth,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pangolin {
    pub newt_id: &'static str,
    pub newt_secret: &'static str,
    pub endpoint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Auth {
    pub access_token: &'static str,
    pub refresh_token: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

impl Payload {
    /// Fixture matching `path`, the request path (query included).
    pub fn for_path(path: &str) -> Self {
        if path.contains("/register") {
            Payload::Claim(ClaimCode {
                claim_code: TEST_CLAIM_CODE,
            })
        } else if path.contains("/config") {
            Payload::Config(ClientConfig {
                customer: Customer {
                    first_name: "Test",
                    last_name: "User",
                    email: "test@example.com",
                },
                pangolin: Pangolin {
                    newt_id: "test",
                    newt_secret: "secret",
                    endpoint: "http://test",
                },
                auth: Auth {
                    access_token: "token",
                    refresh_token: "refresh",
                },
            })
        } else {
            Payload::Ack(Ack { status: "ok" })
        }
    }
}

/// Describe the response for `outcome` on a request to `path`.
pub fn render(outcome: Outcome, path: &str) -> Rendered {
    let status = match outcome {
        Outcome::Terminate => return Rendered::Terminate,
        Outcome::Status(status) => status,
    };

    let (content_type, body) = match status.as_u16() {
        200 | 201 => (Some(JSON_CONTENT_TYPE), Some(Payload::for_path(path))),
        204 => (None, None),
        _ => (Some(JSON_CONTENT_TYPE), None),
    };

    Rendered::Reply(Reply {
        status,
        reason: reason_phrase(status.as_u16()),
        content_type,
        body,
    })
}
