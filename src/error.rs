//! Error types for the Yahoo Fantasy client and OAuth gateway

use thiserror::Error;


pub type Result<T> = std::result::Result<T, YahooError>;

#[derive(Error, Debug)]
pub enum YahooError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Path '{path}' resolves outside the Fantasy API")]
    OutsideApi { path: String },

    #[error("Yahoo token not provided: pass --token, set {env_var}, or run `token save`")]
    MissingToken { env_var: String },

    #[error("Stored Yahoo token could not be decoded")]
    InvalidToken,

    #[error("Yahoo token expired; run `yahoo-fantasy token refresh`")]
    TokenExpired,

    #[error("Invalid team key '{value}': expected <game>.l.<league>.t.<team>")]
    InvalidTeamKey { value: String },

    #[error("{env_var} is not set")]
    MissingConfig { env_var: String },

    #[error(transparent)]
    Auth(#[from] crate::oauth::AuthError),
}
