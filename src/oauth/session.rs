//! The sign-in and refresh lifecycle.
//!
//! `GET /api/auth` without a `code` starts the flow: a fresh CSRF state goes
//! into the `oauth_state` cookie and the browser is sent to Yahoo. Yahoo sends
//! it back with `code` and `state`; the state must equal the cookie before the
//! code is exchanged. `POST /api/auth/refresh` swaps a refresh token for a new
//! access token.

use axum::http::{
    header::{CONTENT_TYPE, HOST},
    HeaderMap,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::{AppConfig, ClientCredentials},
    oauth::{
        client::TokenClient,
        cookies::{build_cookie, clear_cookie, read_cookie},
        redirect::{authorization_url, resolve_redirect_uri},
        token::{now_millis, OAuthToken},
        AuthError, AUTH_COOKIE, AUTH_COOKIE_MAX_AGE, STATE_COOKIE, STATE_COOKIE_MAX_AGE,
    },
};


/// Query parameters of `GET /api/auth`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl AuthParams {
    /// Read `code` and `state` from a raw query string.
    ///
    /// The first occurrence of each key wins. Parsing never fails: bad escapes
    /// are kept literally and invalid UTF-8 is replaced.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            let slot = match &*key {
                "code" => &mut params.code,
                "state" => &mut params.state,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// A 303 redirect and the cookies to set on it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRedirect {
    pub location: String,
    pub set_cookies: Vec<String>,
}

impl AuthRedirect {
    /// Back to the landing page with `auth_error`, dropping any pending state.
    pub fn failure(err: &AuthError) -> Self {
        Self {
            location: format!("/?auth_error={}", err.query_code()),
            set_cookies: vec![clear_cookie(STATE_COOKIE)],
        }
    }
}

/// Result of a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refreshed {
    pub token: OAuthToken,
    pub set_cookie: String,
}

/// A new CSRF state value.
pub fn new_state() -> String {
    Uuid::new_v4().to_string()
}

/// The callback `state` must be present and equal the stored one.
pub fn verify_state(returned: Option<&str>, stored: Option<&str>) -> Result<(), AuthError> {
    match (returned, stored) {
        (Some(returned), Some(stored)) if !returned.is_empty() && returned == stored => Ok(()),
        _ => Err(AuthError::StateMismatch),
    }
}

/// Refresh token from a JSON (`refresh_token` or `refreshToken`) or
/// form-encoded (`refresh_token`) body. Other content types carry none.
pub fn refresh_token_from_body(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct RefreshBody {
        refresh_token: Option<String>,
        #[serde(rename = "refreshToken")]
        refresh_token_camel: Option<String>,
    }

    let content_type = content_type.unwrap_or_default();
    let token = if content_type.contains("application/json") {
        let parsed: RefreshBody = serde_json::from_slice(body).ok()?;
        parsed.refresh_token.or(parsed.refresh_token_camel)
    } else if content_type.contains("application/x-www-form-urlencoded") {
        url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "refresh_token")
            .map(|(_, value)| value.into_owned())
    } else {
        None
    };

    token.filter(|t| !t.is_empty())
}

/// Refresh token carried inside the `yahoo_oauth` cookie, if any.
pub fn refresh_token_from_cookie(headers: &HeaderMap) -> Option<String> {
    let encoded = read_cookie(headers, AUTH_COOKIE)?;
    OAuthToken::decode(&encoded)?
        .refresh_token
        .filter(|t| !t.is_empty())
}

/// Drives the OAuth endpoints. Holds no per-user state.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    config: AppConfig,
    http: Client,
}

impl AuthFlow {
    pub fn new(config: AppConfig, http: Client) -> Self {
        Self { config, http }
    }

    fn credentials(&self) -> Result<&ClientCredentials, AuthError> {
        self.config.credentials.as_ref().ok_or(AuthError::MissingConfig)
    }

    fn token_client(&self, credentials: &ClientCredentials) -> TokenClient {
        TokenClient::new(
            self.http.clone(),
            self.config.endpoints.token_url.clone(),
            &credentials.client_id,
            &credentials.client_secret,
        )
    }

    /// Handle `GET /api/auth`. Always answers with a redirect.
    ///
    /// `fallback_host` is used when the request has no `Host` header (e.g. the
    /// authority of an absolute request URI).
    pub async fn authorize(
        &self,
        params: &AuthParams,
        headers: &HeaderMap,
        fallback_host: Option<&str>,
    ) -> AuthRedirect {
        match self.try_authorize(params, headers, fallback_host).await {
            Ok(redirect) => redirect,
            Err(err) => {
                warn!(error = %err, "Yahoo sign-in aborted");
                AuthRedirect::failure(&err)
            }
        }
    }

    async fn try_authorize(
        &self,
        params: &AuthParams,
        headers: &HeaderMap,
        fallback_host: Option<&str>,
    ) -> Result<AuthRedirect, AuthError> {
        let credentials = self.credentials()?;
        let host = headers
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .or(fallback_host);
        let redirect_uri = resolve_redirect_uri(self.config.redirect_uri.as_deref(), host)
            .ok_or(AuthError::MissingConfig)?;

        match params.code.as_deref().filter(|c| !c.is_empty()) {
            None => Ok(self.start(credentials, &redirect_uri)),
            Some(code) => {
                self.callback(credentials, &redirect_uri, code, params.state.as_deref(), headers)
                    .await
            }
        }
    }

    fn start(&self, credentials: &ClientCredentials, redirect_uri: &str) -> AuthRedirect {
        let state = new_state();
        let url = authorization_url(
            &self.config.endpoints.authorize_url,
            &credentials.client_id,
            redirect_uri,
            &state,
        );
        info!(redirect_uri, "Yahoo OAuth redirect");

        AuthRedirect {
            location: url.into(),
            set_cookies: vec![build_cookie(STATE_COOKIE, &state, Some(STATE_COOKIE_MAX_AGE))],
        }
    }

    async fn callback(
        &self,
        credentials: &ClientCredentials,
        redirect_uri: &str,
        code: &str,
        returned_state: Option<&str>,
        headers: &HeaderMap,
    ) -> Result<AuthRedirect, AuthError> {
        let stored_state = read_cookie(headers, STATE_COOKIE);
        verify_state(returned_state, stored_state.as_deref())?;

        let token = self
            .token_client(credentials)
            .exchange_code(code, redirect_uri)
            .await?
            .into_token(now_millis(), None);
        info!("Yahoo sign-in complete");

        Ok(AuthRedirect {
            location: "/".to_string(),
            set_cookies: vec![
                clear_cookie(STATE_COOKIE),
                build_cookie(AUTH_COOKIE, &token.encode(), Some(AUTH_COOKIE_MAX_AGE)),
            ],
        })
    }

    /// Exchange a refresh token. The old refresh token is kept if Yahoo does
    /// not rotate it.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthToken, AuthError> {
        let credentials = self.credentials()?;
        let token = self
            .token_client(credentials)
            .refresh(refresh_token)
            .await?
            .into_token(now_millis(), Some(refresh_token.to_string()));
        Ok(token)
    }

    /// Handle `POST /api/auth/refresh`.
    ///
    /// The refresh token comes from the body, else from the token cookie.
    pub async fn refresh(&self, headers: &HeaderMap, body: &[u8]) -> Result<Refreshed, AuthError> {
        self.credentials()?;

        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let refresh_token = refresh_token_from_body(content_type, body)
            .or_else(|| refresh_token_from_cookie(headers))
            .ok_or(AuthError::MissingRefreshToken)?;

        let token = self.refresh_token(&refresh_token).await?;
        info!("Yahoo token refreshed");

        Ok(Refreshed {
            set_cookie: build_cookie(AUTH_COOKIE, &token.encode(), Some(AUTH_COOKIE_MAX_AGE)),
            token,
        })
    }
}
