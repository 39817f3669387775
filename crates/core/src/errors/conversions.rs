//! Conversion implementations for error types

use super::types::Error;

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Only cursors are base64 encoded, so a decode failure is always bad input
impl From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Self {
        Error::Validation {
            field: "cursor".to_string(),
            message: format!("not valid base64: {error}"),
        }
    }
}
