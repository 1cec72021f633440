//! Token record in the shape returned by the sign-in exchange.
//!
//! ```json
//! { "uid": "1b017638-...", "token": { "access_token": "eyJ0...", "token_type": "Bearer" } }
//! ```

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use serde::{Deserialize, Deserializer, Serialize};

/// Credentials of the signed-in principal.
///
/// The default value is the empty record held before anyone signs in; it
/// serializes as `{"token":{}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default)]
    pub token: AccessToken,
}

/// Bearer token payload nested inside a [`TokenRecord`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_type: String,
    /// Expiry as seconds since the Unix epoch, when the issuer provides it.
    /// Fractional seconds on the wire are floored.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_exp")]
    pub exp: Option<i64>,
}

impl AccessToken {
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), token_type: "Bearer".to_owned(), exp: None }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }
}

impl TokenRecord {
    #[must_use]
    pub fn new(uid: impl Into<String>, token: AccessToken) -> Self {
        Self { uid: Some(uid.into()), token }
    }

    /// Parse a sign-in response body.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if the body is not a JSON
    /// object of the expected shape.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// True when no principal and no token are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.token.is_empty()
    }

    /// Value for an `Authorization` header, e.g. `"Bearer eyJ0..."`.
    ///
    /// Falls back to the `Bearer` scheme when the issuer left `token_type`
    /// blank. Returns `None` for an empty token.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        if self.token.is_empty() {
            return None;
        }
        let scheme = if self.token.token_type.is_empty() { "Bearer" } else { self.token.token_type.as_str() };
        Some(format!("{scheme} {}", self.token.access_token))
    }

    /// Whether the token carries an expiry at or before `now_secs`.
    ///
    /// Tokens without `exp` never report as expired; the store itself never
    /// calls this.
    #[must_use]
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.token.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Accept any JSON number for `exp`, integer or not.
#[allow(clippy::cast_possible_truncation)]
fn deserialize_exp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Number>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|secs| secs.floor() as i64))))
}
