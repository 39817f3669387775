//! Turning raw write payloads into store inputs

use lorekeeper_core::{
    EntityPatch, Error, Result, UserId, Visibility, FIELD_OWNER_ID, FIELD_VISIBILITY,
    RESERVED_FIELDS,
};
use serde_json::{Map, Value};

/// Kind-specific attributes of a payload, without the fields the access
/// layer controls
pub(crate) fn attributes(payload: &Map<String, Value>) -> Map<String, Value> {
    payload
        .iter()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Visibility for a new resource: `PUBLIC` when absent, an error when
/// present but not a recognised literal
pub(crate) fn create_visibility(
    payload: &Map<String, Value>,
    resolved: Option<Visibility>,
) -> Result<Visibility> {
    match (payload.get(FIELD_VISIBILITY), resolved) {
        (_, Some(visibility)) => Ok(visibility),
        (None | Some(Value::Null), None) => Ok(Visibility::Public),
        (Some(raw), None) => Err(invalid_visibility(raw)),
    }
}

/// Build the patch for an update. Ownership cannot move through an update.
pub(crate) fn patch(payload: &Map<String, Value>, current_owner: Option<&UserId>) -> Result<EntityPatch> {
    if let Some(raw) = payload.get(FIELD_OWNER_ID) {
        let unchanged = match (raw, current_owner) {
            (Value::String(requested), Some(owner)) => requested == owner.as_str(),
            (Value::Null, None) => true,
            _ => false,
        };
        if !unchanged {
            return Err(Error::validation(
                FIELD_OWNER_ID,
                "ownership cannot be changed by an update",
            ));
        }
    }

    let visibility = match payload.get(FIELD_VISIBILITY) {
        None | Some(Value::Null) => None,
        Some(raw) => Some(Visibility::from_value(raw).ok_or_else(|| invalid_visibility(raw))?),
    };

    Ok(EntityPatch {
        visibility,
        attributes: attributes(payload),
    })
}

fn invalid_visibility(raw: &Value) -> Error {
    Error::validation(
        FIELD_VISIBILITY,
        format!("{raw} is not one of PUBLIC, PRIVATE, HIDDEN"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeeper_core::ErrorCode;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_reserved_fields_are_stripped() {
        let payload = map(json!({
            "id": "forged",
            "ownerRole": "ADMIN",
            "createdAt": "1970-01-01T00:00:00Z",
            "name": "Aria",
            "level": 3
        }));
        let attrs = attributes(&payload);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["name"], json!("Aria"));
    }

    #[test]
    fn test_create_visibility_rules() {
        assert_eq!(
            create_visibility(&Map::new(), None).unwrap(),
            Visibility::Public
        );
        assert_eq!(
            create_visibility(&map(json!({"visibility": "HIDDEN"})), Some(Visibility::Hidden)).unwrap(),
            Visibility::Hidden
        );
        let err = create_visibility(&map(json!({"visibility": "SECRET"})), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_patch_rejects_ownership_moves() {
        let owner = UserId::new("u1");
        assert!(patch(&map(json!({"ownerId": "u1", "name": "x"})), Some(&owner)).is_ok());
        let err = patch(&map(json!({"ownerId": "u2"})), Some(&owner)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_patch_visibility_is_strict() {
        let p = patch(&map(json!({"visibility": "PRIVATE"})), None).unwrap();
        assert_eq!(p.visibility, Some(Visibility::Private));
        assert!(patch(&map(json!({"visibility": 7})), None).is_err());
        assert!(patch(&map(json!({"visibility": null})), None).unwrap().is_empty());
    }
}
