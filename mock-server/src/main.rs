use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mock_server::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mock_server=info,script_core=info")),
        )
        .init();

    let (addr, responder) = Config::parse().into_parts();
    let listener = mock_server::bind(addr).with_context(|| format!("cannot bind to {addr}"))?;
    info!(
        addr = %listener.local_addr().unwrap_or(addr),
        method = %responder.target(),
        steps = responder.sequencer().script_len(),
        "listening"
    );

    mock_server::serve(listener, Arc::new(responder), async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "cannot listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    })
    .await;
    Ok(())
}
