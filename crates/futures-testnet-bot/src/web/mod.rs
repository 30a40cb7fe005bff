/*
[INPUT]:  Shared TradingBot, TCP listener, shutdown token
[OUTPUT]: axum router and server for the order form UI
[POS]:    Web layer - browser front end
[UPDATE]: When adding routes or changing server lifecycle
*/

pub mod handlers;
pub mod templates;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::bot::TradingBot;

/// Default listen address for `serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<TradingBot>,
    pub min_notional: Decimal,
}

impl AppState {
    pub fn new(bot: Arc<TradingBot>, min_notional: Decimal) -> Self {
        Self { bot, min_notional }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/order", post(handlers::place_order))
        .route("/account", get(handlers::account))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Serve the UI until `shutdown` is cancelled
pub async fn serve(listener: TcpListener, state: AppState, shutdown: CancellationToken) -> Result<()> {
    let addr = listener.local_addr().context("read listener address")?;
    info!(%addr, "web UI listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("web server failed")?;

    info!("web UI stopped");
    Ok(())
}
