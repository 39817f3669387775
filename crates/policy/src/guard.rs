//! Decision guards that produce authorization-shaped errors
//!
//! The order of checks matters: view permission is always evaluated before
//! modify permission, so an actor who cannot see a resource gets the same
//! not-found error whether or not the resource exists.

use crate::engine::{can_create, can_modify, can_view, Action};
use lorekeeper_core::{Actor, Error, ResourceDescriptor, ResourceKind, Result};

/// Fail with not-found unless the resource exists and `actor` may see it
pub fn ensure_viewable(
    kind: ResourceKind,
    id: &str,
    actor: Option<&Actor>,
    resource: &ResourceDescriptor,
) -> Result<()> {
    if resource.is_missing() || !can_view(actor, resource) {
        return Err(Error::not_found(kind, id));
    }
    Ok(())
}

/// Fail unless `actor` may modify the resource.
///
/// Anonymous callers get unauthorized before anything about the resource is
/// looked at, callers who cannot see it get not-found, and callers who can
/// see but not change it get forbidden.
pub fn ensure_modifiable(
    kind: ResourceKind,
    id: &str,
    actor: Option<&Actor>,
    resource: &ResourceDescriptor,
) -> Result<()> {
    let Some(actor) = actor else {
        return Err(Error::unauthorized(format!("modify {}", kind.singular())));
    };

    ensure_viewable(kind, id, Some(actor), resource)?;

    if !can_modify(Some(actor), resource) {
        let owner_role = resource
            .owner_role
            .map_or_else(|| "no owner".to_string(), |role| format!("a {role} owner"));
        return Err(Error::forbidden(
            format!("{} {}", Action::Modify.as_str(), kind.singular()),
            format!("{} may not modify a resource with {owner_role}", actor.role),
        ));
    }
    Ok(())
}

/// Fail with unauthorized unless an actor is present
pub fn ensure_can_create(kind: ResourceKind, actor: Option<&Actor>) -> Result<&Actor> {
    match actor {
        Some(actor) if can_create(Some(actor)) => Ok(actor),
        _ => Err(Error::unauthorized(format!("create {}", kind.singular()))),
    }
}
