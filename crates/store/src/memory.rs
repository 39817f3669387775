//! In-memory [`ResourceStore`]

use crate::eval::{matches, sort_entities};
use async_trait::async_trait;
use chrono::Utc;
use lorekeeper_core::{
    Entity, EntityPatch, Error, Filter, NewEntity, OrderBy, ResourceId, ResourceKind,
    ResourceStore, Result, Role, UserId, Visibility, FIELD_USERNAME,
};
use parking_lot::{Mutex, RwLock};
use serde_json::{json, Map};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;
use uuid::Uuid;

type Collection = BTreeMap<ResourceId, Entity>;

/// Stores every collection in process memory.
///
/// Filters and orderings are evaluated row by row with [`crate::eval`], so
/// the store behaves like a database that applies the filter in the query.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<ResourceKind, Collection>>,
    injected_failure: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed entity, replacing any entity with the same id
    pub fn insert(&self, kind: ResourceKind, entity: Entity) {
        self.collections
            .write()
            .entry(kind)
            .or_default()
            .insert(entity.id.clone(), entity);
    }

    /// Insert a user record. Users own themselves, so the record's owner is
    /// its own id and its owner role is the user's role.
    pub fn insert_user(&self, id: &str, role: Role) -> Entity {
        let now = Utc::now();
        let mut attributes = Map::new();
        attributes.insert(FIELD_USERNAME.to_string(), json!(id));
        let user = Entity {
            id: ResourceId::new(id),
            owner_id: Some(UserId::new(id)),
            visibility: Visibility::Public,
            owner_role: Some(role),
            created_at: now,
            updated_at: now,
            attributes,
        };
        self.insert(ResourceKind::Users, user.clone());
        user
    }

    /// Number of stored entities of `kind`
    #[must_use]
    pub fn len(&self, kind: ResourceKind) -> usize {
        self.collections.read().get(&kind).map_or(0, BTreeMap::len)
    }

    #[must_use]
    pub fn is_empty(&self, kind: ResourceKind) -> bool {
        self.len(kind) == 0
    }

    /// Make the next storage call fail with `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.injected_failure.lock() = Some(message.into());
    }

    fn check_failure(&self, operation: &str) -> Result<()> {
        match self.injected_failure.lock().take() {
            Some(message) => Err(Error::storage(operation, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn find_one(&self, kind: ResourceKind, id: &ResourceId) -> Result<Option<Entity>> {
        self.check_failure("find_one")?;
        Ok(self
            .collections
            .read()
            .get(&kind)
            .and_then(|collection| collection.get(id))
            .cloned())
    }

    async fn find_many(
        &self,
        kind: ResourceKind,
        filter: &Filter,
        order_by: &[OrderBy],
        limit: usize,
    ) -> Result<Vec<Entity>> {
        self.check_failure("find_many")?;
        let mut rows: Vec<Entity> = self
            .collections
            .read()
            .get(&kind)
            .map(|collection| {
                collection
                    .values()
                    .filter(|entity| matches(filter, entity))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        sort_entities(&mut rows, order_by);
        rows.truncate(limit);
        trace!(kind = %kind, returned = rows.len(), limit, "find_many");
        Ok(rows)
    }

    async fn count(&self, kind: ResourceKind, filter: &Filter) -> Result<u64> {
        self.check_failure("count")?;
        let count = self.collections.read().get(&kind).map_or(0, |collection| {
            collection
                .values()
                .filter(|entity| matches(filter, entity))
                .count()
        });
        Ok(count as u64)
    }

    async fn create(&self, kind: ResourceKind, entity: NewEntity) -> Result<Entity> {
        self.check_failure("create")?;
        let now = Utc::now();
        let created = Entity {
            id: ResourceId::new(Uuid::new_v4().to_string()),
            owner_id: entity.owner_id,
            visibility: entity.visibility,
            owner_role: entity.owner_role,
            created_at: now,
            updated_at: now,
            attributes: entity.attributes,
        };
        self.insert(kind, created.clone());
        trace!(kind = %kind, id = %created.id, "created");
        Ok(created)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        patch: EntityPatch,
    ) -> Result<Option<Entity>> {
        self.check_failure("update")?;
        let mut collections = self.collections.write();
        let Some(entity) = collections.get_mut(&kind).and_then(|c| c.get_mut(id)) else {
            return Ok(None);
        };
        patch.apply_to(entity);
        entity.updated_at = Utc::now();
        Ok(Some(entity.clone()))
    }

    async fn delete(&self, kind: ResourceKind, id: &ResourceId) -> Result<bool> {
        self.check_failure("delete")?;
        Ok(self
            .collections
            .write()
            .get_mut(&kind)
            .and_then(|collection| collection.remove(id))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorekeeper_core::{ErrorCode, SortDirection};

    fn new_item(owner: &str, name: &str, visibility: Visibility) -> NewEntity {
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), json!(name));
        NewEntity {
            owner_id: Some(UserId::new(owner)),
            owner_role: Some(Role::User),
            visibility,
            attributes,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let created = store
            .create(ResourceKind::Items, new_item("u1", "Sword", Visibility::Public))
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(
            store.find_one(ResourceKind::Items, &created.id).await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(store.len(ResourceKind::Items), 1);
        assert!(store.is_empty(ResourceKind::Tags));
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let store = MemoryStore::new();
        let created = store
            .create(ResourceKind::Items, new_item("u1", "Sword", Visibility::Public))
            .await
            .unwrap();
        assert_eq!(store.find_one(ResourceKind::Skills, &created.id).await.unwrap(), None);
        assert!(!store.delete(ResourceKind::Skills, &created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_many_filters_sorts_and_limits() {
        let store = MemoryStore::new();
        for (name, visibility) in [
            ("c", Visibility::Public),
            ("a", Visibility::Private),
            ("b", Visibility::Public),
            ("d", Visibility::Public),
        ] {
            store
                .create(ResourceKind::Items, new_item("u1", name, visibility))
                .await
                .unwrap();
        }

        let rows = store
            .find_many(
                ResourceKind::Items,
                &Filter::equals("visibility", "PUBLIC"),
                &[OrderBy::new("name", SortDirection::Asc)],
                2,
            )
            .await
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.attributes["name"].clone()).collect();
        assert_eq!(names, [json!("b"), json!("c")]);

        assert_eq!(
            store
                .count(ResourceKind::Items, &Filter::equals("visibility", "PUBLIC"))
                .await
                .unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let created = store
            .create(ResourceKind::Items, new_item("u1", "Sword", Visibility::Public))
            .await
            .unwrap();

        let mut attributes = Map::new();
        attributes.insert("name".to_string(), json!("Axe"));
        let updated = store
            .update(
                ResourceKind::Items,
                &created.id,
                EntityPatch {
                    visibility: Some(Visibility::Hidden),
                    attributes,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.attributes["name"], json!("Axe"));
        assert_eq!(updated.visibility, Visibility::Hidden);
        assert_eq!(updated.owner_id, created.owner_id);
        assert!(updated.updated_at >= created.updated_at);

        assert!(store
            .update(ResourceKind::Items, &ResourceId::new("ghost"), EntityPatch::default())
            .await
            .unwrap()
            .is_none());

        assert!(store.delete(ResourceKind::Items, &created.id).await.unwrap());
        assert!(!store.delete(ResourceKind::Items, &created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_injected_failure_hits_one_call() {
        let store = MemoryStore::new();
        store.fail_next("connection reset");
        let err = store
            .find_one(ResourceKind::Items, &ResourceId::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(store
            .find_one(ResourceKind::Items, &ResourceId::new("x"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_users_own_themselves() {
        let store = MemoryStore::new();
        let user = store.insert_user("m1", Role::Moderator);
        let descriptor = store
            .find_descriptor(ResourceKind::Users, &user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.owner_id, Some(UserId::new("m1")));
        assert_eq!(descriptor.owner_role, Some(Role::Moderator));
    }
}
