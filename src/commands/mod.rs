//! Command implementations for the Yahoo Fantasy CLI

pub mod common;
pub mod leagues;
pub mod roster;
pub mod serve;
pub mod token;

use std::path::Path;

use crate::{core::load_encoded, oauth::OAuthToken, Result, YahooError, TOKEN_ENV_VAR};


/// Decode a token as pasted by a user. Cookie values copied from a browser
/// may still be percent-encoded.
pub fn decode_pasted(encoded: &str) -> Option<OAuthToken> {
    OAuthToken::decode(encoded).or_else(|| {
        let unescaped = urlencoding::decode(encoded.trim()).ok()?;
        OAuthToken::decode(&unescaped)
    })
}

/// Pick the encoded token: explicit flag, then environment, then token file.
fn resolve_encoded(
    explicit: Option<String>,
    from_env: Option<String>,
    token_file: &Path,
) -> Option<String> {
    explicit
        .filter(|t| !t.trim().is_empty())
        .or_else(|| from_env.filter(|t| !t.trim().is_empty()))
        .or_else(|| load_encoded(token_file))
}

fn resolve_token_from(
    explicit: Option<String>,
    from_env: Option<String>,
    token_file: &Path,
) -> Result<OAuthToken> {
    let encoded =
        resolve_encoded(explicit, from_env, token_file).ok_or_else(|| YahooError::MissingToken {
            env_var: TOKEN_ENV_VAR.to_string(),
        })?;
    decode_pasted(&encoded).ok_or(YahooError::InvalidToken)
}

/// Resolve the token for a command run.
pub fn resolve_token(explicit: Option<String>, token_file: &Path) -> Result<OAuthToken> {
    resolve_token_from(explicit, std::env::var(TOKEN_ENV_VAR).ok(), token_file)
}
