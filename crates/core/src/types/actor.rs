//! The authenticated caller

use super::{ResourceDescriptor, Role, UserId};
use serde::{Deserialize, Serialize};

/// An authenticated caller.
///
/// Anonymous callers are modelled as `Option<&Actor>::None` everywhere in the
/// access layer, never as an actor with a weaker role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub fn new(id: impl Into<UserId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    #[must_use]
    pub fn user(id: impl Into<UserId>) -> Self {
        Self::new(id, Role::User)
    }

    #[must_use]
    pub fn moderator(id: impl Into<UserId>) -> Self {
        Self::new(id, Role::Moderator)
    }

    #[must_use]
    pub fn admin(id: impl Into<UserId>) -> Self {
        Self::new(id, Role::Admin)
    }

    /// Whether this actor is the recorded owner of the resource
    #[must_use]
    pub fn owns(&self, resource: &ResourceDescriptor) -> bool {
        resource.owner_id.as_ref() == Some(&self.id)
    }
}
