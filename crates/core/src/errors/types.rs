//! Core error type definitions

use crate::types::ResourceKind;

/// Result type alias for lorekeeper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lorekeeper operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resource does not exist, or exists but the actor may not see it.
    /// Both cases carry the same shape so callers cannot tell them apart.
    NotFound { kind: ResourceKind, id: String },

    /// The resource is visible to the actor but may not be modified by it
    Forbidden { action: String, message: String },

    /// The action requires an authenticated actor
    Unauthorized { action: String },

    /// Malformed input: cursors, sort directions, visibility literals, limits
    Validation { field: String, message: String },

    /// Errors surfaced by the storage collaborator
    Storage {
        operation: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Ownership resolution was attempted without a storage handle
    MissingStore { operation: String },

    /// Configuration errors
    Configuration { message: String },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
