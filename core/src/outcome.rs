//! Scripted outcomes and the script that orders them.
//!
//! # Design
//! On the command line a script is a plain comma-separated list of integers in
//! which `0` means "drop the connection". That sentinel is resolved here, at
//! the parsing boundary, into `Outcome::Terminate`; everything past this module
//! sees a tagged variant and never a raw `0`.

use std::fmt;
use std::str::FromStr;

use crate::error::ScriptError;

/// A final status number the transport can put on an HTTP/1.1 status line.
///
/// Not restricted to registered codes: `299` or `999` are accepted so clients
/// can be tested against quasi-valid statuses. The `200..=999` bound is a wire
/// constraint: `http::StatusCode` stops at 999, and hyper rewrites a 1xx final
/// response to 500, so those codes could never reach the client as scripted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Status(u16);

impl Status {
    pub const OK: Status = Status(200);
    pub const NOT_FOUND: Status = Status(404);

    pub fn new(code: u16) -> Result<Self, ScriptError> {
        if (200..=999).contains(&code) {
            Ok(Status(code))
        } else {
            Err(ScriptError::OutOfRange(i64::from(code)))
        }
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the server does for one matching request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Close the connection without writing any response bytes.
    Terminate,
    /// Reply with this status.
    Status(Status),
}

impl Outcome {
    /// Builds a status outcome, validating `code` like [`Status::new`].
    pub fn status(code: u16) -> Result<Self, ScriptError> {
        Status::new(code).map(Outcome::Status)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Terminate => f.write_str("terminate"),
            Outcome::Status(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for Outcome {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code: i64 = trimmed
            .parse()
            .map_err(|_| ScriptError::InvalidEntry(trimmed.to_string()))?;
        match code {
            0 => Ok(Outcome::Terminate),
            200..=999 => Ok(Outcome::Status(Status(code as u16))),
            _ => Err(ScriptError::OutOfRange(code)),
        }
    }
}

/// Ordered list of outcomes, immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    outcomes: Vec<Outcome>,
}

impl Script {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl From<Vec<Outcome>> for Script {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self::new(outcomes)
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    /// Parses the wire form, e.g. `"429,429,200"` or `"0,200"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::parse)
            .collect::<Result<Vec<Outcome>, _>>()
            .map(Script::new)
    }
}
