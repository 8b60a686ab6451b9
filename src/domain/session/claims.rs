//! Loosely-typed claims decoded from an access token payload.

use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;

/// A single claim value.
///
/// Claim shape is owned by whoever issued the token, so scalars are
/// typed and anything nested is kept as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
    Structured(JsonValue),
}

impl ClaimValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClaimValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ClaimValue::Null)
    }
}

impl From<JsonValue> for ClaimValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => ClaimValue::Text(s),
            JsonValue::Number(n) => ClaimValue::Number(n),
            JsonValue::Bool(b) => ClaimValue::Bool(b),
            JsonValue::Null => ClaimValue::Null,
            other => ClaimValue::Structured(other),
        }
    }
}

/// Key/value claims map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims(BTreeMap<String, ClaimValue>);

impl Claims {
    /// Builds claims from a JSON value. Only objects qualify.
    pub fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self(
                map.into_iter()
                    .map(|(key, value)| (key, ClaimValue::from(value)))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClaimValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_typed() {
        let claims = Claims::from_json(json!({
            "sub": "user-1",
            "exp": 1700000000,
            "admin": true,
            "tenant": null,
        }))
        .unwrap();

        assert_eq!(claims.get("sub").and_then(ClaimValue::as_str), Some("user-1"));
        assert_eq!(claims.get("exp").and_then(ClaimValue::as_i64), Some(1_700_000_000));
        assert_eq!(claims.get("admin").and_then(ClaimValue::as_bool), Some(true));
        assert!(claims.get("tenant").map(ClaimValue::is_null).unwrap_or(false));
        assert_eq!(claims.len(), 4);
    }

    #[test]
    fn nested_values_are_structured() {
        let claims = Claims::from_json(json!({"aud": ["api", "web"]})).unwrap();
        assert_eq!(
            claims.get("aud"),
            Some(&ClaimValue::Structured(json!(["api", "web"])))
        );
    }

    #[test]
    fn non_objects_are_not_claims() {
        assert!(Claims::from_json(json!("just a string")).is_none());
        assert!(Claims::from_json(json!([1, 2, 3])).is_none());
    }

    #[test]
    fn missing_key_is_absent() {
        let claims = Claims::from_json(json!({})).unwrap();
        assert!(claims.is_empty());
        assert!(!claims.contains("sub"));
        assert!(claims.get("sub").is_none());
    }
}
