//! HTTP transport for the scripted response engine.
//!
//! # Overview
//! Serves a [`Responder`] over HTTP/1.1 so an external client can be driven
//! through a fixed sequence of statuses, including dropped connections.
//!
//! # Design
//! - A single axum fallback handler receives every request; routing decisions
//!   live in `script_core`, not in axum routes.
//! - `Rendered::Terminate` cannot be expressed as an HTTP response, so the
//!   handler tags an empty response with [`Disconnect`] and the connection
//!   service in [`server`] turns that tag into a service error. Hyper then
//!   closes the socket without writing anything.
//! - Reason phrases come from `script_core::reason_phrase` and are attached
//!   with `hyper::ext::ReasonPhrase`, so non-standard codes read `Unknown`.

pub mod config;
pub mod server;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use hyper::ext::ReasonPhrase;
use script_core::{HttpMethod, Rendered, Responder};
use tracing::error;

pub use config::Config;
pub use server::{bind, run, serve, ConnectionAborted};

/// Response extension asking the connection to be dropped unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnect;

pub fn app(responder: Arc<Responder>) -> Router {
    Router::new().fallback(respond).with_state(responder)
}

async fn respond(State(responder): State<Arc<Responder>>, method: Method, uri: Uri) -> Response {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    to_response(responder.respond(map_method(&method), path))
}

fn map_method(method: &Method) -> Option<HttpMethod> {
    match *method {
        Method::GET => Some(HttpMethod::Get),
        Method::POST => Some(HttpMethod::Post),
        Method::PUT => Some(HttpMethod::Put),
        Method::PATCH => Some(HttpMethod::Patch),
        Method::DELETE => Some(HttpMethod::Delete),
        _ => None,
    }
}

fn to_response(rendered: Rendered) -> Response {
    let reply = match rendered {
        Rendered::Terminate => {
            let mut response = Response::new(Body::empty());
            response.extensions_mut().insert(Disconnect);
            return response;
        }
        Rendered::Reply(reply) => reply,
    };

    // `Status` is validated to 200..=999, all of which `from_u16` accepts.
    let status = match StatusCode::from_u16(reply.status.as_u16()) {
        Ok(status) => status,
        Err(err) => {
            error!(status = %reply.status, %err, "status rejected by http");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let body = match &reply.body {
        Some(payload) => match serde_json::to_vec(payload) {
            Ok(bytes) => Body::from(bytes),
            Err(err) => {
                error!(%err, "cannot serialize response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        },
        None => Body::empty(),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    if let Some(content_type) = reply.content_type {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
        .extensions_mut()
        .insert(ReasonPhrase::from_static(reply.reason.as_bytes()));
    response
}
