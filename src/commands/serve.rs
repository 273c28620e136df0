//! Serve command implementation

use std::net::SocketAddr;

use crate::{config::AppConfig, server, Result};

/// Handle the serve command
pub async fn handle_serve(bind: SocketAddr) -> Result<()> {
    let config = AppConfig::from_env()?;
    server::serve(bind, config).await
}
