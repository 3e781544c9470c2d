//! Keep-alive HTTP responder for external uptime monitors.
//!
//! Shares no state with the bot.

use std::net::SocketAddr;

use axum::{routing::get, Router};

const ALIVE_TEXT: &str = "Бот работает!";

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

async fn alive() -> &'static str {
    ALIVE_TEXT
}

/// Serve until the process exits. Bind or serve failures are logged only.
pub async fn serve(addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, "keep-alive listener failed to bind: {e}");
            return;
        }
    };
    tracing::info!(%addr, "keep-alive listener started");

    if let Err(e) = axum::serve(listener, router()).await {
        tracing::error!(%addr, "keep-alive listener stopped: {e}");
    }
}
