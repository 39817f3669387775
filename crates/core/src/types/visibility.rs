//! Visibility tiers

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Who may see a resource.
///
/// - `Public`: anyone, including anonymous callers
/// - `Private`: the owner and admins
/// - `Hidden`: the owner, admins and moderators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Private,
    Hidden,
}

impl Visibility {
    /// Every tier, in declaration order
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Private, Visibility::Hidden];

    /// The wire literal for this tier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Private => "PRIVATE",
            Visibility::Hidden => "HIDDEN",
        }
    }

    /// Lenient parse used on creation payloads: anything that is not a
    /// recognised literal yields `None` instead of an error.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PUBLIC" => Ok(Visibility::Public),
            "PRIVATE" => Ok(Visibility::Private),
            "HIDDEN" => Ok(Visibility::Hidden),
            other => Err(Error::validation(
                "visibility",
                format!("'{other}' is not one of PUBLIC, PRIVATE, HIDDEN"),
            )),
        }
    }
}

impl From<Visibility> for Value {
    fn from(visibility: Visibility) -> Self {
        Value::String(visibility.as_str().to_string())
    }
}
