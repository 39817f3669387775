//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { kind, id } => {
                write!(f, "{} '{id}' not found", kind.singular())
            }
            Error::Forbidden { action, message } => {
                write!(f, "forbidden to {action}: {message}")
            }
            Error::Unauthorized { action } => {
                write!(f, "authentication required to {action}")
            }
            Error::Validation { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
            Error::Storage {
                operation, message, ..
            } => {
                write!(f, "storage {operation} failed: {message}")
            }
            Error::MissingStore { operation } => {
                write!(f, "{operation} requires a storage handle but none was configured")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}
