//! Storage collaborator contract
//!
//! The access layer never talks to a database directly. Adapters implement
//! [`ResourceStore`] and translate [`Filter`] / [`OrderBy`] into their own
//! query language. Implementations must apply the filter inside the query;
//! the access layer relies on it to keep restricted rows out of results.

use crate::errors::Result;
use crate::types::{
    Entity, EntityPatch, Filter, NewEntity, OrderBy, ResourceDescriptor, ResourceId, ResourceKind,
};
use async_trait::async_trait;

/// Trait for the storage layer behind every resource collection
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Fetch one entity by id
    async fn find_one(&self, kind: ResourceKind, id: &ResourceId) -> Result<Option<Entity>>;

    /// Fetch only the ownership columns of one entity.
    ///
    /// Adapters with a cheaper projection should override this.
    async fn find_descriptor(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
    ) -> Result<Option<ResourceDescriptor>> {
        Ok(self.find_one(kind, id).await?.map(|entity| entity.descriptor()))
    }

    /// Fetch at most `limit` entities matching `filter` in `order_by` order
    async fn find_many(
        &self,
        kind: ResourceKind,
        filter: &Filter,
        order_by: &[OrderBy],
        limit: usize,
    ) -> Result<Vec<Entity>>;

    /// Count entities matching `filter`
    async fn count(&self, kind: ResourceKind, filter: &Filter) -> Result<u64>;

    /// Insert a new entity, assigning its id and timestamps
    async fn create(&self, kind: ResourceKind, entity: NewEntity) -> Result<Entity>;

    /// Apply a patch; `None` when no entity has that id
    async fn update(
        &self,
        kind: ResourceKind,
        id: &ResourceId,
        patch: EntityPatch,
    ) -> Result<Option<Entity>>;

    /// Delete by id; `false` when no entity has that id
    async fn delete(&self, kind: ResourceKind, id: &ResourceId) -> Result<bool>;
}
