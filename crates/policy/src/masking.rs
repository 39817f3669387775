//! Post-fetch redaction of owner-identifying fields
//!
//! Masking runs after an entity has already been judged viewable. It only
//! narrows the shape handed back; it never revisits the visibility decision.

use lorekeeper_core::{Actor, Entity, ResourceDescriptor, Role, Visibility};

/// Whether `viewer` may learn who owns `resource`: the owner, admins, and
/// moderators looking at a hidden resource
#[must_use]
pub fn reveals_owner(viewer: Option<&Actor>, resource: &ResourceDescriptor) -> bool {
    match viewer {
        None => false,
        Some(viewer) if viewer.owns(resource) => true,
        Some(viewer) => match viewer.role {
            Role::Admin => true,
            Role::Moderator => resource.visibility == Some(Visibility::Hidden),
            Role::User => false,
        },
    }
}

/// Strip `ownerId` and the denormalised `ownerRole` unless the viewer may
/// see them
#[must_use]
pub fn mask_entity(viewer: Option<&Actor>, mut entity: Entity) -> Entity {
    if !reveals_owner(viewer, &entity.descriptor()) {
        entity.owner_id = None;
        entity.owner_role = None;
    }
    entity
}
