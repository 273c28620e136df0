//! OAuth token record and its opaque cookie encoding

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tokens are treated as expired this long before the provider would reject them.
pub const DEFAULT_EXPIRY_SKEW_MS: i64 = 30_000;

/// A Yahoo OAuth token as carried in the `yahoo_oauth` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds, as granted by the provider.
    #[serde(default, deserialize_with = "de_seconds")]
    pub expires_in: u64,
    pub token_type: String,
    /// Epoch millis at which this service received the token.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xoauth_yahoo_guid: Option<String>,
}

/// Seconds may arrive as a number or a numeric string. Anything else is 0.
pub(crate) fn de_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl OAuthToken {
    /// Epoch millis at which the provider stops accepting this token.
    pub fn expires_at(&self) -> i64 {
        let lifetime_ms = i64::try_from(self.expires_in)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        self.created_at.saturating_add(lifetime_ms)
    }

    pub fn is_expired_at(&self, now_ms: i64, skew_ms: i64) -> bool {
        now_ms.saturating_add(skew_ms) >= self.expires_at()
    }

    /// Expired (with the default skew) as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_millis(), DEFAULT_EXPIRY_SKEW_MS)
    }

    /// base64(JSON(token))
    pub fn encode(&self) -> String {
        // Serializing a struct of strings and integers cannot fail
        let json = serde_json::to_string(self).unwrap_or_default();
        STANDARD.encode(json.as_bytes())
    }

    /// Inverse of [`encode`](Self::encode). Returns `None` for anything that
    /// is not a token with a non-empty access token and token type.
    pub fn decode(encoded: &str) -> Option<Self> {
        let bytes = STANDARD.decode(encoded.trim()).ok()?;
        let json = String::from_utf8(bytes).ok()?;
        let token: OAuthToken = serde_json::from_str(&json).ok()?;

        if token.access_token.is_empty() || token.token_type.is_empty() {
            return None;
        }
        Some(token)
    }
}
