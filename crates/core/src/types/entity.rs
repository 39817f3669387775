//! Stored entities and the payloads that create or change them

use super::{ResourceDescriptor, ResourceId, Role, UserId, Visibility};
use crate::constants::{
    FIELD_CREATED_AT, FIELD_ID, FIELD_OWNER_ID, FIELD_OWNER_ROLE, FIELD_UPDATED_AT,
    FIELD_VISIBILITY,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One stored record of any resource kind.
///
/// Kind-specific columns live in `attributes`; the ownership columns are
/// first-class so the entity reduces to a [`ResourceDescriptor`] without I/O.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_role: Option<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Entity {
    /// Reduce to the shape policy decisions are made against
    #[must_use]
    pub fn descriptor(&self) -> ResourceDescriptor {
        ResourceDescriptor::new(self.owner_id.clone(), Some(self.visibility), self.owner_role)
    }

    /// Value of a named field as the storage layer sees it.
    ///
    /// Timestamps render as fixed-width RFC 3339 so that string comparison
    /// matches chronological order.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            FIELD_ID => Some(Value::String(self.id.to_string())),
            FIELD_OWNER_ID => Some(
                self.owner_id
                    .as_ref()
                    .map_or(Value::Null, |id| Value::String(id.to_string())),
            ),
            FIELD_VISIBILITY => Some(self.visibility.into()),
            FIELD_OWNER_ROLE => Some(
                self.owner_role
                    .map_or(Value::Null, |role| Value::String(role.to_string())),
            ),
            FIELD_CREATED_AT => Some(timestamp_value(&self.created_at)),
            FIELD_UPDATED_AT => Some(timestamp_value(&self.updated_at)),
            other => self.attributes.get(other).cloned(),
        }
    }
}

fn timestamp_value(at: &DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Everything a store needs to insert a new entity; the store assigns the
/// id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntity {
    pub owner_id: Option<UserId>,
    pub owner_role: Option<Role>,
    pub visibility: Visibility,
    pub attributes: Map<String, Value>,
}

/// Changes applied by an update. Ownership is immutable through updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPatch {
    pub visibility: Option<Visibility>,
    pub attributes: Map<String, Value>,
}

impl EntityPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visibility.is_none() && self.attributes.is_empty()
    }

    /// Apply the patch in place; a `null` attribute removes the key
    pub fn apply_to(&self, entity: &mut Entity) {
        if let Some(visibility) = self.visibility {
            entity.visibility = visibility;
        }
        for (key, value) in &self.attributes {
            if value.is_null() {
                entity.attributes.remove(key);
            } else {
                entity.attributes.insert(key.clone(), value.clone());
            }
        }
    }
}
