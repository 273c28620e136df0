//! On-disk token storage for the CLI
//!
//! The encoded token (the same base64 text the `yahoo_oauth` cookie carries)
//! is kept in a single file under the user's config directory.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::oauth::OAuthToken;

/// Path: <config_dir>/yahoo-fantasy/token
pub fn token_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join("yahoo-fantasy").join("token")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Encoded token stored at `path`, trimmed. Blank files count as absent.
pub fn load_encoded(path: &Path) -> Option<String> {
    let contents = try_read_to_string(path)?;
    let trimmed = contents.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Persist a token in its encoded form.
pub fn save_token(path: &Path, token: &OAuthToken) -> std::io::Result<()> {
    debug!(path = %path.display(), "Saving Yahoo token");
    write_string(path, &format!("{}\n", token.encode()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_token() -> OAuthToken {
        OAuthToken {
            access_token: "acc".to_string(),
            refresh_token: Some("ref".to_string()),
            expires_in: 3600,
            token_type: "bearer".to_string(),
            created_at: 1_700_000_000_000,
            xoauth_yahoo_guid: None,
        }
    }

    #[test]
    fn test_token_path() {
        let path = token_path();
        let path_str = path.to_string_lossy();

        assert!(path_str.contains("yahoo-fantasy"));
        assert!(path.ends_with("yahoo-fantasy/token"));
    }

    #[test]
    fn test_try_read_to_string_nonexistent_file() {
        let dir = tempdir().unwrap();
        assert_eq!(try_read_to_string(&dir.path().join("missing")), None);
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("token");

        write_string(&file_path, "abc").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "abc");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("yahoo-fantasy").join("token");
        let token = sample_token();

        save_token(&file_path, &token).unwrap();

        let encoded = load_encoded(&file_path).unwrap();
        assert_eq!(OAuthToken::decode(&encoded), Some(token));
    }

    #[test]
    fn test_blank_file_is_absent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("token");
        fs::write(&file_path, "  \n").unwrap();

        assert_eq!(load_encoded(&file_path), None);
    }
}
