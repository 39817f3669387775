//! Public error taxonomy exposed to callers of the access layer

use super::types::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error code attached to every [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    Forbidden,
    Unauthorized,
    ValidationError,
    InternalError,
}

impl ErrorCode {
    /// The wire literal for this code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status a route layer would typically map this code to
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::Forbidden => 403,
            ErrorCode::Unauthorized => 401,
            ErrorCode::ValidationError => 400,
            ErrorCode::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Map this error onto the public taxonomy
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::NotFound { .. } => ErrorCode::NotFound,
            Error::Forbidden { .. } => ErrorCode::Forbidden,
            Error::Unauthorized { .. } => ErrorCode::Unauthorized,
            Error::Validation { .. } => ErrorCode::ValidationError,
            Error::Storage { .. }
            | Error::MissingStore { .. }
            | Error::Configuration { .. }
            | Error::Json { .. } => ErrorCode::InternalError,
        }
    }

    /// Whether this error is one of the authorization-shaped codes
    #[must_use]
    pub fn is_access_denial(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::NotFound | ErrorCode::Forbidden | ErrorCode::Unauthorized
        )
    }
}
