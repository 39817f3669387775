#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use lorekeeper_access::AccessService;
use lorekeeper_cache::AnonymousListCache;
use lorekeeper_core::{
    Entity, ResourceId, ResourceKind, ResourceStore, Role, UserId, Visibility,
};
use lorekeeper_store::MemoryStore;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// A service over a fresh store and its own cache, so tests never share
/// cached pages through the process-wide cache
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub cache: Arc<AnonymousListCache>,
    pub service: AccessService,
    seeded: std::sync::atomic::AtomicI64,
}

impl Fixture {
    pub fn new() -> Self {
        Self::over(|store| store as Arc<dyn ResourceStore>)
    }

    /// Like [`Fixture::new`], but the service talks to whatever `wrap`
    /// builds around the seeded store
    pub fn over(wrap: impl FnOnce(Arc<MemoryStore>) -> Arc<dyn ResourceStore>) -> Self {
        lorekeeper_utils::init_for_tests();
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(AnonymousListCache::new(std::time::Duration::from_secs(30)));
        let service = AccessService::builder()
            .store(wrap(Arc::clone(&store)))
            .cache(Arc::clone(&cache))
            .build()
            .expect("default configuration is valid");
        Self {
            store,
            cache,
            service,
            seeded: std::sync::atomic::AtomicI64::new(0),
        }
    }

    /// Insert an entity with a strictly increasing `createdAt`
    pub fn seed(
        &self,
        kind: ResourceKind,
        id: &str,
        owner: Option<(&str, Role)>,
        visibility: Visibility,
        name: &str,
    ) -> Entity {
        let n = self
            .seeded
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(n);
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), json!(name));
        let entity = Entity {
            id: ResourceId::new(id),
            owner_id: owner.map(|(id, _)| UserId::new(id)),
            visibility,
            owner_role: owner.map(|(_, role)| role),
            created_at: at,
            updated_at: at,
            attributes,
        };
        self.store.insert(kind, entity.clone());
        entity
    }
}

pub fn id(raw: &str) -> ResourceId {
    ResourceId::new(raw)
}

pub fn query(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

pub fn ids(items: &[Entity]) -> Vec<String> {
    items.iter().map(|e| e.id.to_string()).collect()
}
