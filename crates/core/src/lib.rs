//! Core domain types, errors, and constants for `lorekeeper`.
//!
//! Every other crate in the workspace builds on the building blocks defined
//! here: the role and visibility model, the resource descriptor that policy
//! decisions are made against, the filter language pushed down to storage,
//! and the storage collaborator contract itself.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum, its public `ErrorCode` taxonomy and the
//!   `Result` alias.
//! - **`types`**: Roles, visibility tiers, actors, entities, resource kinds
//!   and the storage filter language.
//! - **`store`**: The `ResourceStore` trait implemented by storage adapters.
//! - **`config`**: Cache and pagination settings with their defaults.
//! - **`constants`**: Field names, TTLs and page size limits.

pub mod config;
pub mod constants;
pub mod errors;
pub mod store;
pub mod types;

pub use self::{
    config::{AccessConfig, AccessConfigBuilder, CacheSettings, PaginationSettings},
    constants::*,
    errors::{Error, ErrorCode, Result, ResultExt},
    store::ResourceStore,
    types::*,
};
