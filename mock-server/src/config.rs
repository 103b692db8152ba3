//! Command-line configuration.
//!
//! Positional arguments mirror the usual invocation from test scripts:
//!
//! ```text
//! mock-server 18080 DELETE 429,429,200
//! ```
//!
//! The method and the response list are parsed with the `script_core`
//! parsers, so a bad value stops the process before anything is bound.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use script_core::{HttpMethod, Responder, Script};

#[derive(Debug, Clone, Parser)]
#[command(name = "mock-server", version, about = "Replay a scripted sequence of HTTP responses")]
pub struct Config {
    /// Port to listen on
    #[arg(env = "PORT")]
    pub port: u16,

    /// HTTP method the script applies to (case-insensitive); other methods get 404
    #[arg(env = "MOCK_METHOD")]
    pub method: HttpMethod,

    /// Comma-separated status codes returned in order, `0` drops the connection.
    /// The last entry repeats once the list is used up.
    #[arg(env = "MOCK_RESPONSES", allow_hyphen_values = true)]
    pub responses: Script,

    /// Address to bind
    #[arg(long, env = "MOCK_BIND", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn into_parts(self) -> (SocketAddr, Responder) {
        let addr = self.addr();
        (addr, Responder::new(self.method, self.responses))
    }
}
