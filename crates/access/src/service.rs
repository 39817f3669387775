//! The policy-enforcing front door to every resource collection

use crate::payload;
use lorekeeper_cache::{list_key, AnonymousListCache};
use lorekeeper_core::{
    AccessConfig, Actor, CacheSettings, Entity, Error, Filter, NewEntity, ResourceDescriptor,
    ResourceId, ResourceKind, ResourceStore, Result, Role, UserId, FIELD_OWNER_ID,
};
use lorekeeper_pagination::{Page, PageRequest};
use lorekeeper_policy::{
    apply_security_filters, ensure_can_create, ensure_modifiable, ensure_viewable, mask_entity,
    OwnershipResolver,
};
use lorekeeper_utils::{access_span, policy_denied};
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, Instrument};

/// Runs every read and write through ownership resolution, policy checks,
/// security filters, pagination, masking and the anonymous list cache
#[derive(Clone)]
pub struct AccessService {
    store: Arc<dyn ResourceStore>,
    resolver: OwnershipResolver,
    cache: Arc<AnonymousListCache>,
    config: AccessConfig,
}

impl fmt::Debug for AccessService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessService")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AccessService`]
#[derive(Default)]
pub struct AccessServiceBuilder {
    store: Option<Arc<dyn ResourceStore>>,
    cache: Option<Arc<AnonymousListCache>>,
    config: AccessConfig,
}

impl AccessServiceBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn ResourceStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn config(mut self, config: AccessConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific cache instead of the process-wide one
    #[must_use]
    pub fn cache(mut self, cache: Arc<AnonymousListCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Validate the configuration and assemble the service.
    ///
    /// Without an explicit cache, default cache settings share the
    /// process-wide cache and any other settings get a cache of their own.
    pub fn build(self) -> Result<AccessService> {
        self.config.validate()?;
        let store = self
            .store
            .ok_or_else(|| Error::missing_store("build access service"))?;
        let cache = self.cache.unwrap_or_else(|| {
            if self.config.cache == CacheSettings::default() {
                AnonymousListCache::global()
            } else {
                Arc::new(AnonymousListCache::from_settings(&self.config.cache))
            }
        });

        info!(
            cache_enabled = cache.is_enabled(),
            cache_ttl_secs = cache.ttl().as_secs(),
            default_limit = self.config.pagination.default_limit,
            max_limit = self.config.pagination.max_limit,
            "access service ready"
        );

        Ok(AccessService {
            resolver: OwnershipResolver::new(Arc::clone(&store)),
            store,
            cache,
            config: self.config,
        })
    }
}

fn denied<T>(kind: ResourceKind, id: &str, action: &str, result: Result<T>) -> Result<T> {
    result.inspect_err(|e| policy_denied(kind, id, action, e.code().as_str()))
}

impl AccessService {
    #[must_use]
    pub fn builder() -> AccessServiceBuilder {
        AccessServiceBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<AnonymousListCache> {
        &self.cache
    }

    #[must_use]
    pub fn resolver(&self) -> &OwnershipResolver {
        &self.resolver
    }

    /// Fetch one resource as `actor` may see it.
    ///
    /// A resource the actor may not view is reported exactly like one that
    /// does not exist.
    pub async fn get(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        actor: Option<&Actor>,
    ) -> Result<Entity> {
        async {
            let descriptor = self.resolver.resolve(kind, id).await?;
            denied(kind, id, "view", ensure_viewable(kind, id, actor, &descriptor))?;

            let entity = self
                .store
                .find_one(kind, id)
                .await?
                .ok_or_else(|| Error::not_found(kind, id.as_str()))?;
            // The row may have changed since it was resolved
            denied(kind, id, "view", ensure_viewable(kind, id, actor, &entity.descriptor()))?;
            Ok::<_, Error>(mask_entity(actor, entity))
        }
        .instrument(access_span(kind, "get", actor.is_none()))
        .await
    }

    /// List the resources of `kind` matching `base` that `actor` may see.
    ///
    /// `query` holds the raw pagination parameters. Anonymous results are
    /// served from and stored into the list cache.
    pub async fn list(
        &self,
        kind: ResourceKind,
        query: &Map<String, Value>,
        base: &Filter,
        actor: Option<&Actor>,
    ) -> Result<Page<Entity>> {
        async {
            let request = PageRequest::from_query(kind, query, &self.config.pagination)?;
            let filter = apply_security_filters(base, actor);

            let cache_key = match actor {
                None if self.cache.is_enabled() => Some(list_key(
                    kind,
                    &json!({ "query": query, "filter": base }),
                )),
                _ => None,
            };
            let mut generation = 0;
            if let Some(key) = &cache_key {
                if let Some(page) = self.cache.get::<Page<Entity>>(key) {
                    return Ok(page);
                }
                generation = self.cache.generation(key);
            }

            let plan = request.plan();
            let rows = self
                .store
                .find_many(kind, &plan.filter_with(&filter), &plan.order_by, plan.limit)
                .await?;
            let page = request.assemble(rows).map(|entity| mask_entity(actor, entity));
            debug!(
                returned = page.items.len(),
                has_next = page.pagination.has_next,
                "list page assembled"
            );

            if let Some(key) = cache_key {
                self.cache.insert_if_current(key, &page, generation);
            }
            Ok::<_, Error>(page)
        }
        .instrument(access_span(kind, "list", actor.is_none()))
        .await
    }

    /// Count the resources of `kind` matching `base` that `actor` may see
    pub async fn count_visible(
        &self,
        kind: ResourceKind,
        base: &Filter,
        actor: Option<&Actor>,
    ) -> Result<u64> {
        let filter = apply_security_filters(base, actor);
        self.store
            .count(kind, &filter)
            .instrument(access_span(kind, "count", actor.is_none()))
            .await
    }

    /// Create a resource owned by `actor`, or by the named `ownerId` when an
    /// admin creates on someone else's behalf
    pub async fn create(
        &self,
        kind: ResourceKind,
        payload: &Map<String, Value>,
        actor: Option<&Actor>,
    ) -> Result<Entity> {
        async {
            let actor = denied(kind, "", "create", ensure_can_create(kind, actor))?;
            let requested = OwnershipResolver::resolve_payload(payload);
            let visibility = payload::create_visibility(payload, requested.visibility)?;
            let (owner_id, owner_role) = self.creation_owner(kind, actor, requested.owner_id).await?;

            let created = self
                .store
                .create(
                    kind,
                    NewEntity {
                        owner_id: Some(owner_id),
                        owner_role: Some(owner_role),
                        visibility,
                        attributes: payload::attributes(payload),
                    },
                )
                .await?;
            self.invalidate(kind);
            info!(id = %created.id, visibility = %created.visibility, "resource created");
            Ok::<_, Error>(mask_entity(Some(actor), created))
        }
        .instrument(access_span(kind, "create", actor.is_none()))
        .await
    }

    async fn creation_owner(
        &self,
        kind: ResourceKind,
        actor: &Actor,
        requested: Option<UserId>,
    ) -> Result<(UserId, Role)> {
        match requested {
            None => Ok((actor.id.clone(), actor.role)),
            Some(owner) if owner == actor.id => Ok((owner, actor.role)),
            Some(owner) if actor.role == Role::Admin => {
                match self.resolver.owner_role_of(&owner).await? {
                    Some(role) => Ok((owner, role)),
                    None => Err(Error::validation(
                        FIELD_OWNER_ID,
                        format!("no user '{owner}' to own the new {}", kind.singular()),
                    )),
                }
            }
            Some(_) => denied(
                kind,
                "",
                "create",
                Err(Error::forbidden(
                    format!("create {}", kind.singular()),
                    format!("{} may not create resources for another user", actor.role),
                )),
            ),
        }
    }

    /// Apply `payload` to an existing resource
    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        payload: &Map<String, Value>,
        actor: Option<&Actor>,
    ) -> Result<Entity> {
        async {
            let current = self.authorize_modify(kind, id, actor).await?;
            let patch = payload::patch(payload, current.owner_id.as_ref())?;

            let updated = self
                .store
                .update(kind, id, patch)
                .await?
                .ok_or_else(|| Error::not_found(kind, id.as_str()))?;
            self.invalidate(kind);
            info!(id = %id, "resource updated");
            Ok::<_, Error>(mask_entity(actor, updated))
        }
        .instrument(access_span(kind, "update", actor.is_none()))
        .await
    }

    /// Delete an existing resource
    pub async fn delete(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        actor: Option<&Actor>,
    ) -> Result<()> {
        async {
            self.authorize_modify(kind, id, actor).await?;
            if !self.store.delete(kind, id).await? {
                return Err(Error::not_found(kind, id.as_str()));
            }
            self.invalidate(kind);
            info!(id = %id, "resource deleted");
            Ok::<_, Error>(())
        }
        .instrument(access_span(kind, "delete", actor.is_none()))
        .await
    }

    async fn authorize_modify(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        actor: Option<&Actor>,
    ) -> Result<ResourceDescriptor> {
        // Anonymous callers are refused before anything is looked up
        if actor.is_none() {
            return denied(
                kind,
                id,
                "modify",
                Err(Error::unauthorized(format!("modify {}", kind.singular()))),
            );
        }
        let descriptor = self.resolver.resolve(kind, id).await?;
        denied(kind, id, "modify", ensure_modifiable(kind, id, actor, &descriptor))?;
        Ok(descriptor)
    }

    fn invalidate(&self, kind: ResourceKind) {
        let removed = self.cache.invalidate_kind(kind);
        debug!(removed, "list cache invalidated");
    }
}
