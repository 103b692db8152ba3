//! Listener setup and the per-connection accept loop.
//!
//! Connections are served with hyper's HTTP/1.1 builder directly rather than
//! `axum::serve`, because dropping a connection without a response needs
//! control over the connection service.

use std::error::Error as _;
use std::future::{pending, Future};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Request, Router};
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use script_core::Responder;
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tower::ServiceExt;
use tracing::{debug, warn};

use crate::{app, Disconnect};

const LISTEN_BACKLOG: u32 = 1024;

/// Service error that makes hyper close the connection without a response.
#[derive(Debug, Error)]
#[error("connection aborted by scripted outcome")]
pub struct ConnectionAborted;

/// Bind a listener with `SO_REUSEADDR`, so a restarted server can take the
/// port back immediately. Must be called from within a tokio runtime.
pub fn bind(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(LISTEN_BACKLOG)
}

/// Serve until the process is killed.
pub async fn run(listener: TcpListener, responder: Arc<Responder>) {
    serve(listener, responder, pending()).await
}

/// Accept connections until `shutdown` resolves. Connections already being
/// served keep running on their own tasks.
pub async fn serve<F>(listener: TcpListener, responder: Arc<Responder>, shutdown: F)
where
    F: Future<Output = ()>,
{
    let app = app(responder);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, remote)) => {
                    tokio::spawn(serve_connection(stream, remote, app.clone()));
                }
                Err(err) => warn!(%err, "accept failed"),
            },
            _ = &mut shutdown => {
                debug!("shutdown requested, no longer accepting");
                break;
            }
        }
    }
}

async fn serve_connection(stream: TcpStream, remote: SocketAddr, app: Router) {
    let service = service_fn(move |request: Request<Incoming>| {
        let app = app.clone();
        async move {
            let response = match app.oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
            if response.extensions().get::<Disconnect>().is_some() {
                return Err(ConnectionAborted);
            }
            Ok(response)
        }
    });

    if let Err(err) = http1::Builder::new()
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        let aborted = err
            .source()
            .is_some_and(|source| source.is::<ConnectionAborted>());
        if aborted {
            debug!(%remote, "dropped connection without response");
        } else {
            debug!(%remote, %err, "connection closed with error");
        }
    }
}
