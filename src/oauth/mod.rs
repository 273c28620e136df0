//! Yahoo OAuth2: token codec, cookies, and the sign-in / refresh lifecycle.
//!
//! There is no server-side session store. The token lives in the
//! `yahoo_oauth` cookie as base64(JSON) and is decoded on every request.

pub mod client;
pub mod cookies;
pub mod redirect;
pub mod session;
pub mod token;

use axum::http::StatusCode;
use thiserror::Error;

pub use client::{TokenClient, TokenResponse};
pub use session::{AuthFlow, AuthParams, AuthRedirect};
pub use token::OAuthToken;

/// Cookie holding the encoded token.
pub const AUTH_COOKIE: &str = "yahoo_oauth";
/// Cookie holding the CSRF state between redirect and callback.
pub const STATE_COOKIE: &str = "oauth_state";

pub const AUTH_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 30;
pub const STATE_COOKIE_MAX_AGE: u64 = 5 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("OAuth is not configured: missing client credentials or a usable redirect URI")]
    MissingConfig,

    #[error("OAuth state did not match the stored state")]
    StateMismatch,

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("No refresh token available")]
    MissingRefreshToken,
}

impl AuthError {
    /// Value of the `auth_error` query parameter on the landing-page redirect.
    pub fn query_code(&self) -> &'static str {
        match self {
            AuthError::MissingConfig => "missing_config",
            AuthError::StateMismatch => "state_mismatch",
            AuthError::TokenExchangeFailed(_) => "token_exchange_failed",
            AuthError::MissingRefreshToken => "missing_refresh_token",
        }
    }

    /// Status for the programmatic (non-redirect) endpoints.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingConfig => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::StateMismatch => StatusCode::UNAUTHORIZED,
            AuthError::TokenExchangeFailed(_) => StatusCode::BAD_GATEWAY,
            AuthError::MissingRefreshToken => StatusCode::BAD_REQUEST,
        }
    }
}
