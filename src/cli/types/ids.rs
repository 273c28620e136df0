//! Key types for Yahoo Fantasy resources.

use crate::error::{Result, YahooError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Yahoo team keys.
///
/// A team key is `<game>.l.<league>.t.<team>`, where `<game>` is a game code
/// or numeric game id and the league and team ids are numeric.
///
/// # Examples
///
/// ```rust
/// use yahoo_fantasy::TeamKey;
///
/// let key: TeamKey = "428.l.12345.t.3".parse().unwrap();
/// assert_eq!(key.league_key(), "428.l.12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamKey(String);

impl TeamKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the league the team belongs to.
    pub fn league_key(&self) -> &str {
        self.0.rsplitn(3, '.').nth(2).unwrap_or_default()
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_id(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for TeamKey {
    type Err = YahooError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();
        let valid = matches!(
            parts.as_slice(),
            [game, "l", league, "t", team]
                if !game.is_empty()
                    && game.bytes().all(|b| b.is_ascii_alphanumeric())
                    && is_id(league)
                    && is_id(team)
        );

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(YahooError::InvalidTeamKey {
                value: s.to_string(),
            })
        }
    }
}
