//! Ownership resolution
//!
//! Produces the [`ResourceDescriptor`] a policy decision is made against,
//! either by looking up an existing resource or by reading a creation
//! payload that has nothing in storage yet.

use lorekeeper_core::{
    Error, ResourceDescriptor, ResourceId, ResourceKind, ResourceStore, Result, Role, UserId,
    Visibility, FIELD_OWNER_ID, FIELD_VISIBILITY,
};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Resolves ownership through the storage collaborator
#[derive(Clone)]
pub struct OwnershipResolver {
    store: Option<Arc<dyn ResourceStore>>,
}

impl fmt::Debug for OwnershipResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnershipResolver")
            .field("store", &self.store.as_ref().map(|_| "ResourceStore"))
            .finish()
    }
}

impl OwnershipResolver {
    /// Create a resolver backed by `store`
    #[must_use]
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Create a resolver from a possibly missing handle.
    ///
    /// Payload resolution works without a store; any lookup of an existing
    /// resource fails with [`Error::MissingStore`].
    #[must_use]
    pub fn from_optional(store: Option<Arc<dyn ResourceStore>>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self, operation: &str) -> Result<&Arc<dyn ResourceStore>> {
        self.store.as_ref().ok_or_else(|| {
            error!(operation, "ownership resolution attempted without a storage handle");
            Error::missing_store(operation)
        })
    }

    /// Look up the descriptor of an existing resource.
    ///
    /// A resource that does not exist yields [`ResourceDescriptor::missing`];
    /// storage errors propagate unchanged.
    #[instrument(skip(self), fields(kind = %kind, id = %id))]
    pub async fn resolve(&self, kind: ResourceKind, id: &ResourceId) -> Result<ResourceDescriptor> {
        let store = self.store("resolve ownership")?;
        match store.find_descriptor(kind, id).await? {
            Some(descriptor) => Ok(descriptor),
            None => {
                debug!("resource not found, resolving to an empty descriptor");
                Ok(ResourceDescriptor::missing())
            }
        }
    }

    /// Look up the current role of a user, for denormalising `ownerRole`
    pub async fn owner_role_of(&self, user: &UserId) -> Result<Option<Role>> {
        let store = self.store("resolve owner role")?;
        let descriptor = store
            .find_descriptor(ResourceKind::Users, &user.to_resource_id())
            .await?;
        Ok(descriptor.and_then(|d| d.owner_role))
    }

    /// Read the descriptor out of a creation payload.
    ///
    /// `ownerId` must be a string to be taken; an unrecognised `visibility`
    /// literal becomes `None` rather than an error. The owner role is never
    /// trusted from a payload.
    #[must_use]
    pub fn resolve_payload(payload: &Map<String, Value>) -> ResourceDescriptor {
        let owner_id = payload
            .get(FIELD_OWNER_ID)
            .and_then(Value::as_str)
            .map(UserId::new);

        let visibility = payload.get(FIELD_VISIBILITY).and_then(|raw| {
            let parsed = Visibility::from_value(raw);
            if parsed.is_none() && !raw.is_null() {
                warn!(visibility = %raw, "ignoring unrecognised visibility in payload");
            }
            parsed
        });

        ResourceDescriptor::new(owner_id, visibility, None)
    }
}
