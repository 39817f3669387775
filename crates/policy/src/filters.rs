//! Security filter composition for list queries
//!
//! [`security_clause`] is [`crate::engine::can_view`] written as a storage
//! predicate. List queries must carry it so that the store itself never
//! returns a row the actor could not view individually.

use lorekeeper_core::{Actor, Filter, Role, Visibility, FIELD_OWNER_ID, FIELD_VISIBILITY};

/// The restriction `actor` needs on a list query, or `None` when the actor
/// may see everything
#[must_use]
pub fn security_clause(actor: Option<&Actor>) -> Option<Filter> {
    let public = || Filter::equals(FIELD_VISIBILITY, Visibility::Public);
    let owned_by = |actor: &Actor| Filter::equals(FIELD_OWNER_ID, actor.id.clone());

    match actor {
        None => Some(public()),
        Some(actor) => match actor.role {
            Role::Admin => None,
            Role::Moderator => Some(Filter::any([
                public(),
                Filter::equals(FIELD_VISIBILITY, Visibility::Hidden),
                owned_by(actor),
            ])),
            Role::User => Some(Filter::any([public(), owned_by(actor)])),
        },
    }
}

/// Add the actor's restriction alongside the business filters in `base`.
///
/// `base` is left untouched; the result is a new filter that matches exactly
/// the rows matching `base` that the actor may view.
#[must_use]
pub fn apply_security_filters(base: &Filter, actor: Option<&Actor>) -> Filter {
    match security_clause(actor) {
        Some(clause) => base.clone().and(clause),
        None => base.clone(),
    }
}
