//! Pure authorization decisions
//!
//! Every rule lives in one of the two tables below, keyed by who is asking
//! relative to the resource and by the resource's visibility or owner role.
//! Privilege is deliberately never compared numerically: admins may not
//! modify other admins' resources and moderators may not modify other
//! moderators' resources, and those carve-outs have to stay visible.

use lorekeeper_core::{Actor, ResourceDescriptor, Role, Visibility};

/// What an actor is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Modify,
    Create,
}

impl Action {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Modify => "modify",
            Action::Create => "create",
        }
    }
}

/// The asking party, classified relative to one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Anonymous,
    Owner,
    Other(Role),
}

impl Subject {
    /// Classify `actor` against `resource`
    #[must_use]
    pub fn of(actor: Option<&Actor>, resource: &ResourceDescriptor) -> Self {
        match actor {
            None => Subject::Anonymous,
            Some(actor) if actor.owns(resource) => Subject::Owner,
            Some(actor) => Subject::Other(actor.role),
        }
    }
}

fn view_rule(subject: Subject, visibility: Option<Visibility>) -> bool {
    use Visibility::{Hidden, Public};

    match (subject, visibility) {
        (Subject::Owner, _) => true,
        (Subject::Other(Role::Admin), _) => true,
        (Subject::Other(Role::Moderator), Some(Public | Hidden)) => true,
        (Subject::Other(Role::User), Some(Public)) => true,
        (Subject::Anonymous, Some(Public)) => true,
        _ => false,
    }
}

fn modify_rule(subject: Subject, owner_role: Option<Role>) -> bool {
    match (subject, owner_role) {
        (Subject::Owner, _) => true,
        (Subject::Other(Role::Admin), Some(Role::Admin)) => false,
        (Subject::Other(Role::Admin), _) => true,
        (Subject::Other(Role::Moderator), Some(Role::User)) => true,
        (Subject::Other(Role::Moderator), _) => false,
        (Subject::Other(Role::User), _) => false,
        (Subject::Anonymous, _) => false,
    }
}

/// May `actor` see `resource`?
#[must_use]
pub fn can_view(actor: Option<&Actor>, resource: &ResourceDescriptor) -> bool {
    view_rule(Subject::of(actor, resource), resource.visibility)
}

/// May `actor` change or delete `resource`?
///
/// This does not imply [`can_view`]; callers that surface errors must check
/// view permission first (see [`crate::guard`]).
#[must_use]
pub fn can_modify(actor: Option<&Actor>, resource: &ResourceDescriptor) -> bool {
    modify_rule(Subject::of(actor, resource), resource.owner_role)
}

/// May `actor` create new resources?
#[must_use]
pub fn can_create(actor: Option<&Actor>) -> bool {
    actor.is_some()
}

/// Single entry point over all three decisions
#[must_use]
pub fn decide(actor: Option<&Actor>, action: Action, resource: &ResourceDescriptor) -> bool {
    match action {
        Action::View => can_view(actor, resource),
        Action::Modify => can_modify(actor, resource),
        Action::Create => can_create(actor),
    }
}
