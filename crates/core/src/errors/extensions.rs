//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding storage context to Results
pub trait ResultExt<T> {
    /// Wrap any error as a storage failure of the named operation
    fn context(self, operation: impl Into<String>) -> Result<T>;

    /// Add context with a lazy operation name
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, operation: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let message = e.to_string();
            Error::storage_with_source(operation, message, e)
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let message = e.to_string();
            Error::storage_with_source(f(), message, e)
        })
    }
}
