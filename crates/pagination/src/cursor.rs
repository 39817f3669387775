//! Opaque cursor tokens
//!
//! A cursor is the base64 encoding of `{"lastValue": .., "lastId": ..}`.
//! Callers must treat it as opaque; the only supported use is handing back a
//! token this module produced.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use lorekeeper_core::{Entity, Error, ResourceId, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Position of a row in the `(sortField, id)` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Cursor {
    pub last_value: Value,
    pub last_id: ResourceId,
}

impl Cursor {
    #[must_use]
    pub fn new(last_value: impl Into<Value>, last_id: impl Into<ResourceId>) -> Self {
        Self {
            last_value: last_value.into(),
            last_id: last_id.into(),
        }
    }

    /// Cursor pointing at `entity` under an ordering on `sort_field`
    #[must_use]
    pub fn from_entity(entity: &Entity, sort_field: &str) -> Self {
        Self {
            last_value: entity.field(sort_field).unwrap_or(Value::Null),
            last_id: entity.id.clone(),
        }
    }

    /// Encode as an opaque token
    #[must_use]
    pub fn encode(&self) -> String {
        let payload = json!({
            "lastValue": self.last_value,
            "lastId": self.last_id,
        });
        STANDARD.encode(payload.to_string())
    }

    /// Decode a token produced by [`Cursor::encode`].
    ///
    /// Every failure is a validation error: bad base64, bytes that are not
    /// JSON, JSON of the wrong shape, or a position that cannot have come
    /// from a row.
    pub fn decode(token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::validation("cursor", "must not be empty"));
        }

        let bytes = STANDARD.decode(token.trim())?;
        let payload: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "cursor payload is not JSON");
            Error::validation("cursor", "does not encode a list position")
        })?;
        if !payload.is_object() {
            return Err(Error::validation("cursor", "does not encode a list position"));
        }
        let cursor: Cursor = serde_json::from_value(payload).map_err(|e| {
            tracing::debug!(error = %e, "cursor payload has the wrong shape");
            Error::validation("cursor", "does not encode a list position")
        })?;

        cursor.validate()?;
        Ok(cursor)
    }

    fn validate(&self) -> Result<()> {
        if self.last_id.is_empty() {
            return Err(Error::validation("cursor", "lastId must not be empty"));
        }
        if self.last_value.is_object() || self.last_value.is_array() {
            return Err(Error::validation("cursor", "lastValue must be a scalar"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeeper_core::ErrorCode;
    use proptest::prelude::*;

    fn assert_invalid(token: &str) {
        let err = Cursor::decode(token).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError, "token {token:?}: {err}");
    }

    #[test]
    fn test_encode_decode() {
        let cursor = Cursor::new("2024-01-01T00:00:00.000000Z", "item-9");
        let token = cursor.encode();
        assert_eq!(Cursor::decode(&token).unwrap(), cursor);

        let numeric = Cursor::new(42, "a");
        assert_eq!(Cursor::decode(&numeric.encode()).unwrap(), numeric);

        let null_value = Cursor::new(Value::Null, "a");
        assert_eq!(Cursor::decode(&null_value.encode()).unwrap(), null_value);
    }

    #[test]
    fn test_token_is_base64_json() {
        let token = Cursor::new("Axe", "i1").encode();
        let bytes = STANDARD.decode(token).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"lastValue": "Axe", "lastId": "i1"}));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert_invalid("");
        assert_invalid("   ");
        assert_invalid("not base64 at all!");
        assert_invalid(&STANDARD.encode("plain text"));
        assert_invalid(&STANDARD.encode("[1, 2]"));
        assert_invalid(&STANDARD.encode(r#"["x", "a"]"#));
        assert_invalid(&STANDARD.encode(r#"{"lastValue": 1}"#));
        assert_invalid(&STANDARD.encode(r#"{"lastId": "a"}"#));
        assert_invalid(&STANDARD.encode(r#"{"lastValue": 1, "lastId": 7}"#));
        assert_invalid(&STANDARD.encode(r#"{"lastValue": 1, "lastId": ""}"#));
        assert_invalid(&STANDARD.encode(r#"{"lastValue": {"a": 1}, "lastId": "a"}"#));
        assert_invalid(&STANDARD.encode(r#"{"lastValue": 1, "lastId": "a", "extra": true}"#));
    }

    proptest! {
        #[test]
        fn arbitrary_tokens_never_panic(token in ".{0,64}") {
            if let Err(err) = Cursor::decode(&token) {
                prop_assert_eq!(err.code(), ErrorCode::ValidationError);
            }
        }

        #[test]
        fn arbitrary_base64_payloads_are_validation_errors(bytes in prop::collection::vec(any::<u8>(), 0..48)) {
            if let Err(err) = Cursor::decode(&STANDARD.encode(&bytes)) {
                prop_assert_eq!(err.code(), ErrorCode::ValidationError);
            }
        }
    }
}
