//! Access layer over lorekeeper's multi-tenant content collections
//!
//! [`AccessService`] is what request handlers call. For single resources it
//! resolves ownership, checks policy in the order that keeps existence
//! private, fetches and masks. For lists it composes the security filter
//! with the caller's filters, pages with opaque cursors, masks each item and
//! caches anonymous pages. Writes invalidate the cached pages of their kind
//! before returning.

mod payload;
pub mod service;

pub use lorekeeper_pagination::{Page, PageInfo};
pub use service::{AccessService, AccessServiceBuilder};
