//! Newtype wrappers for identifiers

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display};
use std::ops::Deref;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert to String
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Value {
            fn from(id: $name) -> Self {
                Value::String(id.0)
            }
        }
    };
}

string_id!(
    /// Primary key of a stored entity
    ResourceId
);

string_id!(
    /// Identifier of a user, used for actors and resource owners
    UserId
);

impl UserId {
    /// Users are themselves resources; this is the id of the user record
    #[must_use]
    pub fn to_resource_id(&self) -> ResourceId {
        ResourceId(self.0.clone())
    }
}
