//! Builder methods for creating errors with context

use super::types::Error;
use crate::types::ResourceKind;

impl Error {
    /// Create a not-found error for a resource
    #[must_use]
    pub fn not_found(kind: ResourceKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a forbidden error
    #[must_use]
    pub fn forbidden(action: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Forbidden {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    #[must_use]
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Error::Unauthorized {
            action: action.into(),
        }
    }

    /// Create a validation error for a named input
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a storage error without an underlying source
    #[must_use]
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Storage {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error wrapping the adapter's own error
    #[must_use]
    pub fn storage_with_source(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Storage {
            operation: operation.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a missing-store wiring error
    #[must_use]
    pub fn missing_store(operation: impl Into<String>) -> Self {
        Error::MissingStore {
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
