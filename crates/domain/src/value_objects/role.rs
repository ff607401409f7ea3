//! User role value object
//!
//! Roles form a total order `user < engineer < admin`. The order is used
//! only for client-side view gating; the backend authorizes every call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Role of an authenticated user
///
/// Variant order defines the hierarchy, so the derived `Ord` is the
/// gating comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user (citizen-facing staff, complaint intake)
    #[default]
    User,
    /// Field or network engineer
    Engineer,
    /// Administrator
    Admin,
}

impl Role {
    /// All roles, lowest first
    pub const ALL: [Self; 3] = [Self::User, Self::Engineer, Self::Admin];

    /// Check whether this role meets a required role
    ///
    /// `admin` satisfies everything, `engineer` satisfies `engineer` and
    /// `user`, `user` satisfies only `user`.
    #[must_use]
    pub fn satisfies(self, required: Self) -> bool {
        self >= required
    }

    /// Wire representation as used by the backend and the session file
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Engineer => "engineer",
            Self::Admin => "admin",
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Engineer => "Engineer",
            Self::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "engineer" => Ok(Self::Engineer),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}
