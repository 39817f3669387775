//! Shared utilities for lorekeeper
//!
//! Tracing initialisation and the structured span and event helpers the
//! access layer emits through.

pub mod tracing;

pub use crate::tracing::*;
