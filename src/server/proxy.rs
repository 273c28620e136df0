//! `GET /api/yahoo?path=...`: forwards a Fantasy API read with the caller's
//! token and relays the upstream answer.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    oauth::{cookies::read_cookie, OAuthToken, AUTH_COOKIE},
    server::AppState,
    yahoo::http::DEFAULT_PATH,
    YahooError,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProxyParams {
    pub path: Option<String>,
}

/// Accept only relative paths under `fantasy/`.
///
/// Dot segments are refused, including percent-encoded ones and those split
/// by a backslash, since URL joining would resolve them out of the `fantasy/`
/// tree. The joined URL is checked again before forwarding.
pub fn sanitize_path(path: &str) -> Option<&str> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return None;
    }
    if !trimmed.starts_with("fantasy/") {
        return None;
    }
    let route = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    let dot_segment = |segment: &str| match urlencoding::decode(segment) {
        Ok(decoded) => decoded == "." || decoded == "..",
        Err(_) => true,
    };
    if route.split(['/', '\\']).any(dot_segment) {
        return None;
    }
    Some(trimmed)
}

/// Access token from the `yahoo_oauth` cookie.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let encoded = read_cookie(headers, AUTH_COOKIE)?;
    OAuthToken::decode(&encoded).map(|token| token.access_token)
}

pub async fn yahoo(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyParams>,
    headers: HeaderMap,
) -> Response {
    let requested = params.path.as_deref().unwrap_or(DEFAULT_PATH);
    let Some(path) = sanitize_path(requested) else {
        return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
    };

    let Some(token) = access_token(&headers) else {
        return (StatusCode::UNAUTHORIZED, "Missing Yahoo token").into_response();
    };

    debug!(path, "Forwarding Yahoo request");
    let upstream = match state.yahoo.forward(&token, path).await {
        Ok(upstream) => upstream,
        Err(YahooError::OutsideApi { .. }) => {
            return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
        }
        Err(e) => {
            warn!(error = %e, "Yahoo API unreachable");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();

    let body = match upstream.bytes().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Yahoo API response was cut short");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let mut response = (status, body).into_response();
    match content_type {
        Some(content_type) => {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::COOKIE, HeaderValue};

    #[test]
    fn test_sanitize_path_accepts_fantasy_paths() {
        assert_eq!(
            sanitize_path("  fantasy/v2/game/nba?format=json "),
            Some("fantasy/v2/game/nba?format=json")
        );
        assert_eq!(sanitize_path(DEFAULT_PATH), Some(DEFAULT_PATH));
    }

    #[test]
    fn test_sanitize_path_rejects() {
        for path in [
            "",
            "   ",
            "https://evil.example.com/fantasy/",
            "http://fantasysports.yahooapis.com/fantasy/v2",
            "/fantasy/v2/game/nba",
            "v2/game/nba",
            "fantasy/../admin",
            "fantasy/v2/./x",
            "fantasy/%2e%2e/x",
            "fantasy/v2/%2E%2E/%2e%2e/x",
            "fantasy/%2e/x",
            "fantasy/.%2E/x",
            "fantasy/..\\admin",
            "fantasy/v2\\..\\..\\admin",
            "fantasy/%ff%fe/x",
        ] {
            assert_eq!(sanitize_path(path), None, "path {path:?}");
        }
    }

    #[test]
    fn test_dots_in_query_are_fine() {
        assert_eq!(sanitize_path("fantasy/v2/x?q=.."), Some("fantasy/v2/x?q=.."));
        assert_eq!(sanitize_path("fantasy/v2/x?q=%2e%2e"), Some("fantasy/v2/x?q=%2e%2e"));
        assert_eq!(sanitize_path("fantasy/v2/a..b"), Some("fantasy/v2/a..b"));
    }

    #[test]
    fn test_access_token_from_cookie() {
        let token = OAuthToken {
            access_token: "acc".into(),
            refresh_token: None,
            expires_in: 3600,
            token_type: "bearer".into(),
            created_at: 0,
            xoauth_yahoo_guid: None,
        };
        let mut headers = HeaderMap::new();
        let cookie = format!("other=1; yahoo_oauth={}", urlencoding::encode(&token.encode()));
        headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());
        assert_eq!(access_token(&headers), Some("acc".to_string()));

        let mut bad = HeaderMap::new();
        bad.insert(COOKIE, HeaderValue::from_static("yahoo_oauth=%%%"));
        assert_eq!(access_token(&bad), None);
        assert_eq!(access_token(&HeaderMap::new()), None);
    }
}
