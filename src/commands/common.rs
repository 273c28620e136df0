//! Common helpers shared across commands.

use std::path::Path;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::ProviderEndpoints,
    core::try_read_to_string,
    oauth::{token::DEFAULT_EXPIRY_SKEW_MS, OAuthToken},
    yahoo::http::YahooClient,
    Result, YahooError,
};

/// Access token of `token`, refusing tokens that are expired or about to be.
pub fn usable_access_token(token: &OAuthToken, now_ms: i64) -> Result<&str> {
    if token.is_expired_at(now_ms, DEFAULT_EXPIRY_SKEW_MS) {
        return Err(YahooError::TokenExpired);
    }
    Ok(&token.access_token)
}

/// Client for the production Fantasy API.
pub fn yahoo_client() -> Result<YahooClient> {
    let endpoints = ProviderEndpoints::yahoo()?;
    Ok(YahooClient::new(Client::new(), endpoints.api_base))
}

/// A saved API response.
pub fn read_json_file(path: &Path) -> Result<Value> {
    let contents = try_read_to_string(path).ok_or_else(|| {
        YahooError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("cannot read {}", path.display()),
        ))
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Print either pretty JSON or one text line per item.
pub fn print_items<T: Serialize>(
    items: &[T],
    as_json: bool,
    line: impl Fn(&T) -> String,
) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{}", line(item));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn token_created_at(created_at: i64) -> OAuthToken {
        OAuthToken {
            access_token: "acc".to_string(),
            refresh_token: None,
            expires_in: 3600,
            token_type: "bearer".to_string(),
            created_at,
            xoauth_yahoo_guid: None,
        }
    }

    #[test]
    fn test_usable_access_token() {
        let token = token_created_at(0);
        assert_eq!(usable_access_token(&token, 1_000).unwrap(), "acc");
    }

    #[test]
    fn test_expired_token_is_refused() {
        let token = token_created_at(0);
        let err = usable_access_token(&token, 3_600_000 - 29_999).unwrap_err();
        assert!(matches!(err, YahooError::TokenExpired));
    }

    #[test]
    fn test_read_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leagues.json");
        fs::write(&path, r#"{"fantasy_content":{}}"#).unwrap();

        let value = read_json_file(&path).unwrap();
        assert!(value["fantasy_content"].is_object());
    }

    #[test]
    fn test_read_json_file_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_json_file(&dir.path().join("missing.json")).unwrap_err(),
            YahooError::Io(_)
        ));

        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(read_json_file(&path).unwrap_err(), YahooError::Json(_)));
    }
}
