//! Reference storage for the lorekeeper access layer
//!
//! [`MemoryStore`] implements [`lorekeeper_core::ResourceStore`] over process
//! memory. It backs the test suites and shows adapters what the contract
//! expects, in particular that filters are applied inside the query.

pub mod eval;
pub mod memory;

pub use eval::{compare_entities, compare_values, matches, sort_entities};
pub use memory::MemoryStore;
