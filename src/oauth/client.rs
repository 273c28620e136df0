//! Token endpoint client (authorization-code and refresh-token grants).

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::oauth::{
    token::{de_seconds, OAuthToken},
    AuthError,
};

/// Token endpoint used in production.
pub const TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";

/// Provider token endpoint payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, deserialize_with = "de_seconds")]
    pub expires_in: u64,
    pub token_type: String,
    #[serde(default)]
    pub xoauth_yahoo_guid: Option<String>,
}

impl TokenResponse {
    /// Stamp with the local receive time. `previous_refresh` is kept when the
    /// provider did not rotate the refresh token.
    pub fn into_token(self, created_at: i64, previous_refresh: Option<String>) -> OAuthToken {
        OAuthToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh),
            expires_in: self.expires_in,
            token_type: self.token_type,
            created_at,
            xoauth_yahoo_guid: self.xoauth_yahoo_guid,
        }
    }
}

/// Client credentials plus the endpoint they are presented to.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
}

impl TokenClient {
    pub fn new(http: Client, token_url: Url, client_id: &str, client_secret: &str) -> Self {
        Self {
            http,
            token_url,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, AuthError> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ])
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    /// POST a form to the token endpoint with HTTP Basic client auth.
    ///
    /// Transport errors, non-success statuses and unreadable payloads all
    /// surface as `TokenExchangeFailed`.
    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Token endpoint unreachable");
                AuthError::TokenExchangeFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Token endpoint rejected the grant");
            return Err(AuthError::TokenExchangeFailed(format!(
                "token endpoint returned {status}"
            )));
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            warn!(error = %e, "Token endpoint returned an unreadable payload");
            AuthError::TokenExchangeFailed(e.to_string())
        })
    }
}
