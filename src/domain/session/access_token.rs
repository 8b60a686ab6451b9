//! AccessToken value object.
//!
//! An access token is an opaque, pre-issued bearer credential shaped like
//! `header.payload.signature`. This module only checks that shape and
//! decodes the payload segment; signatures are never verified here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use super::claims::{ClaimValue, Claims};
use super::SessionError;

static TOKEN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$")
        .expect("token shape pattern is valid")
});

/// Structurally validated bearer credential.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Trims and validates a raw credential.
    ///
    /// # Errors
    ///
    /// - `InvalidAccessToken` if the value is empty or not three
    ///   URL-safe base64 segments
    pub fn new(raw: &str) -> Result<Self, SessionError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(SessionError::invalid_access_token("token is empty"));
        }
        if !TOKEN_SHAPE.is_match(value) {
            return Err(SessionError::invalid_access_token(
                "expected three dot-separated URL-safe base64 segments",
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the normalized credential.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the middle segment as a claims map.
    ///
    /// Returns `None` on any decoding failure.
    pub fn payload(&self) -> Option<Claims> {
        let segment = self.0.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        Claims::from_json(value)
    }

    /// Looks up a single claim.
    pub fn claim(&self, key: &str) -> Option<ClaimValue> {
        self.payload()?.get(key).cloned()
    }

    /// The `sub` claim, when it is a string.
    pub fn subject(&self) -> Option<String> {
        match self.claim("sub")? {
            ClaimValue::Text(sub) => Some(sub),
            _ => None,
        }
    }
}

impl FromStr for AccessToken {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "AccessToken({}…)", prefix)
    }
}
