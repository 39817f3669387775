//! Authorization for the lorekeeper access layer
//!
//! This crate decides who may see and touch which resources:
//! - Pure decision functions over an actor and a resource descriptor
//! - Guards that turn decisions into not-found / forbidden / unauthorized
//!   errors in the order that avoids leaking existence
//! - Composition of those decisions into storage filters for list queries
//! - Post-fetch masking of owner-identifying fields
//! - Resolution of the descriptor for an existing id or a creation payload

pub mod engine;
pub mod filters;
pub mod guard;
pub mod masking;
pub mod ownership;

pub use engine::{can_create, can_modify, can_view, decide, Action, Subject};
pub use filters::{apply_security_filters, security_clause};
pub use guard::{ensure_can_create, ensure_modifiable, ensure_viewable};
pub use masking::{mask_entity, reveals_owner};
pub use ownership::OwnershipResolver;
