//! Runtime configuration gathered from the environment.

use url::Url;

use crate::{
    oauth::client::TOKEN_URL,
    yahoo::http::API_BASE_URL,
    Result, CLIENT_ID_ENV_VAR, CLIENT_SECRET_ENV_VAR, REDIRECT_URI_ENV_VAR,
};

/// Authorization endpoint used in production.
pub const AUTHORIZE_URL: &str = "https://api.login.yahoo.com/oauth2/request_auth";

/// Where the provider lives. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub authorize_url: Url,
    pub token_url: Url,
    /// Always ends with `/` so relative API paths join beneath it.
    pub api_base: Url,
}

impl ProviderEndpoints {
    pub fn new(authorize_url: &str, token_url: &str, api_base: &str) -> Result<Self> {
        let api_base = if api_base.ends_with('/') {
            Url::parse(api_base)?
        } else {
            Url::parse(&format!("{api_base}/"))?
        };
        Ok(Self {
            authorize_url: Url::parse(authorize_url)?,
            token_url: Url::parse(token_url)?,
            api_base,
        })
    }

    pub fn yahoo() -> Result<Self> {
        Self::new(AUTHORIZE_URL, TOKEN_URL, API_BASE_URL)
    }
}

/// OAuth client id and secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` when either half is missing; the OAuth endpoints then refuse to run.
    pub credentials: Option<ClientCredentials>,
    /// Explicit callback URI; derived from the request host when absent.
    pub redirect_uri: Option<String>,
    pub endpoints: ProviderEndpoints,
}

/// Empty values are treated the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        redirect_uri: Option<String>,
        endpoints: ProviderEndpoints,
    ) -> Self {
        let credentials = match (non_empty(client_id), non_empty(client_secret)) {
            (Some(client_id), Some(client_secret)) => Some(ClientCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Self {
            credentials,
            redirect_uri: non_empty(redirect_uri),
            endpoints,
        }
    }

    /// Read `YAHOO_CLIENT_ID`, `YAHOO_CLIENT_SECRET` and `YAHOO_REDIRECT_URI`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            std::env::var(CLIENT_ID_ENV_VAR).ok(),
            std::env::var(CLIENT_SECRET_ENV_VAR).ok(),
            std::env::var(REDIRECT_URI_ENV_VAR).ok(),
            ProviderEndpoints::yahoo()?,
        ))
    }
}
