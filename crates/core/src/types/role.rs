//! Actor roles

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege tag carried by every authenticated actor.
///
/// Roles are deliberately not `Ord`: the carve-outs between admins and
/// between moderators mean privilege is not a total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 3] = [Role::User, Role::Moderator, Role::Admin];

    /// The wire literal for this role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "USER" => Ok(Role::User),
            "MODERATOR" => Ok(Role::Moderator),
            "ADMIN" => Ok(Role::Admin),
            other => Err(Error::validation(
                "role",
                format!("'{other}' is not one of USER, MODERATOR, ADMIN"),
            )),
        }
    }
}
