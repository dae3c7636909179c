//! Authority roles granted to users.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A role stored in the authorities table.
///
/// Every customer registration grants [`Role::User`] to the user's
/// email. The wire/storage form is the `ROLE_`-prefixed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Standard end-user role, granted at registration.
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
    /// Administrative role.
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Returns the storage representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
