//! Token status, refresh and save commands

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::info;

use crate::{
    config::AppConfig,
    core::{save_token, token_path},
    oauth::{
        token::{now_millis, DEFAULT_EXPIRY_SKEW_MS},
        AuthError, AuthFlow, OAuthToken,
    },
    Result, YahooError, CLIENT_ID_ENV_VAR, CLIENT_SECRET_ENV_VAR,
};

use super::{decode_pasted, resolve_token};

fn format_millis(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

/// Human-readable summary of a token as of `now_ms`.
pub fn describe_token(token: &OAuthToken, now_ms: i64) -> Vec<String> {
    let expired = token.is_expired_at(now_ms, DEFAULT_EXPIRY_SKEW_MS);
    let remaining_secs = (token.expires_at() - now_ms) / 1000;

    let mut lines = vec![
        format!("Token type: {}", token.token_type),
        format!("Issued at: {}", format_millis(token.created_at)),
        format!("Expires at: {}", format_millis(token.expires_at())),
    ];
    if expired {
        lines.push("Status: expired".to_string());
    } else {
        lines.push(format!("Status: valid ({remaining_secs}s remaining)"));
    }
    lines.push(format!(
        "Refresh token: {}",
        if token.refresh_token.is_some() { "present" } else { "missing" }
    ));
    if let Some(guid) = &token.xoauth_yahoo_guid {
        lines.push(format!("Yahoo GUID: {guid}"));
    }
    lines
}

/// Handle `token status`
pub fn handle_token_status(explicit: Option<String>) -> Result<()> {
    let token = resolve_token(explicit, &token_path())?;
    for line in describe_token(&token, now_millis()) {
        println!("{line}");
    }
    Ok(())
}

/// Handle `token refresh`
pub async fn handle_token_refresh(explicit: Option<String>) -> Result<()> {
    let config = AppConfig::from_env()?;
    if config.credentials.is_none() {
        return Err(YahooError::MissingConfig {
            env_var: format!("{CLIENT_ID_ENV_VAR}/{CLIENT_SECRET_ENV_VAR}"),
        });
    }

    let current = resolve_token(explicit, &token_path())?;
    let refresh_token = current
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingRefreshToken)?;

    // tarpaulin::skip - HTTP call, tested via wiremock in oauth::session
    let token = AuthFlow::new(config, Client::new())
        .refresh_token(&refresh_token)
        .await?;

    let path = token_path();
    save_token(&path, &token)?;
    info!(path = %path.display(), "Saved refreshed token");

    println!("✓ Token refreshed, saved to {}", path.display());
    println!("{}", token.encode());
    Ok(())
}

/// Handle `token save`
pub fn handle_token_save(encoded: &str) -> Result<()> {
    let token = decode_pasted(encoded).ok_or(YahooError::InvalidToken)?;
    let path = token_path();
    save_token(&path, &token)?;

    println!("✓ Token saved to {}", path.display());
    if token.is_expired() {
        println!("Token is already expired; run `yahoo-fantasy token refresh`");
    }
    Ok(())
}
