//! HTTP surface: the OAuth endpoints and the Yahoo forwarding gateway.

pub mod handlers;
pub mod proxy;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tracing::{info, warn};

use crate::{config::AppConfig, oauth::AuthFlow, yahoo::http::YahooClient, Result};

/// Address used by `serve` when none is given.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Immutable state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub flow: AuthFlow,
    pub yahoo: YahooClient,
}

impl AppState {
    /// Both halves share one connection pool.
    pub fn new(config: AppConfig, http: Client) -> Self {
        let yahoo = YahooClient::new(http.clone(), config.endpoints.api_base.clone());
        Self {
            flow: AuthFlow::new(config, http),
            yahoo,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth", get(handlers::auth))
        .route("/api/auth/refresh", post(handlers::refresh))
        .route("/api/yahoo", get(proxy::yahoo))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: SocketAddr, config: AppConfig) -> Result<()> {
    if config.credentials.is_none() {
        warn!("Yahoo client credentials are not set; sign-in and refresh will fail");
    }

    let state = Arc::new(AppState::new(config, Client::new()));
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
