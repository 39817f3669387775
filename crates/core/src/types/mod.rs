//! Core domain types for the `lorekeeper` access layer.
//!
//! ## Organization
//!
//! - **`role`** and **`visibility`**: The two tags every policy decision keys on
//! - **`ids`**: Newtype wrappers for resource and user identifiers
//! - **`actor`**: The authenticated caller, or its absence
//! - **`descriptor`**: The `{ownerId, visibility, ownerRole}` triple
//! - **`kind`**: The resource collections served by the content API
//! - **`entity`**: Stored records and the payloads that create or change them
//! - **`filter`**: The storage filter and ordering language

pub mod actor;
pub mod descriptor;
pub mod entity;
pub mod filter;
pub mod ids;
pub mod kind;
pub mod role;
pub mod visibility;

pub use actor::*;
pub use descriptor::*;
pub use entity::*;
pub use filter::*;
pub use ids::*;
pub use kind::*;
pub use role::*;
pub use visibility::*;
