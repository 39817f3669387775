//! The minimal resource shape every policy decision is made against

use super::{Role, UserId, Visibility};
use serde::{Deserialize, Serialize};

/// `{ownerId, visibility, ownerRole}` for one resource.
///
/// `owner_role` is stored alongside the resource at write time so that a
/// decision never needs a second lookup. A descriptor with every field
/// `None` stands for a resource that could not be found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub owner_id: Option<UserId>,
    pub visibility: Option<Visibility>,
    pub owner_role: Option<Role>,
}

impl ResourceDescriptor {
    #[must_use]
    pub fn new(owner_id: Option<UserId>, visibility: Option<Visibility>, owner_role: Option<Role>) -> Self {
        Self {
            owner_id,
            visibility,
            owner_role,
        }
    }

    /// Descriptor of a resource owned by `owner`
    #[must_use]
    pub fn owned(owner: impl Into<UserId>, owner_role: Role, visibility: Visibility) -> Self {
        Self::new(Some(owner.into()), Some(visibility), Some(owner_role))
    }

    /// Descriptor of a resource with no recorded owner
    #[must_use]
    pub fn unowned(visibility: Visibility) -> Self {
        Self::new(None, Some(visibility), None)
    }

    /// Descriptor standing in for a resource that does not exist
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.owner_id.is_none() && self.visibility.is_none() && self.owner_role.is_none()
    }
}
