//! Anonymous read cache for lorekeeper list queries
//!
//! Anonymous list results are identical for every anonymous caller, so a
//! short-lived, process-wide cache in front of them saves repeated storage
//! round-trips. Entries are keyed by `<kind>:list:<sha256>` of the canonical
//! query and invalidated by kind prefix whenever that kind is mutated.

pub mod entry;
pub mod keys;
pub mod list_cache;
pub mod stats;

pub use entry::CacheEntry;
pub use keys::{canonical_json, list_key, query_hash};
pub use list_cache::AnonymousListCache;
pub use stats::CacheStats;
