//! Session persistence port
//!
//! Persists the small amount of client state that must survive restarts:
//! the bearer credential, the username it was issued for, the last known
//! role and the time of the last successful activity.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::Role;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Persisted session keys
///
/// Field names on the wire match the keys the web client kept in local
/// storage so existing state files stay readable.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Bearer credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Username the credential was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Last resolved role
    #[serde(
        default,
        rename = "userRole",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,
    /// Time of the last successful establish or login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Nothing persisted
    pub const fn is_empty(&self) -> bool {
        self.token.is_none()
            && self.username.is_none()
            && self.role.is_none()
            && self.last_activity.is_none()
    }

    /// Idle for longer than `idle_timeout` as of `now`
    ///
    /// Snapshots without an activity stamp are never considered idle.
    pub fn is_idle(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        self.last_activity
            .is_some_and(|last| now.signed_duration_since(last) > idle_timeout)
    }
}

impl fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("role", &self.role)
            .field("last_activity", &self.last_activity)
            .finish()
    }
}

/// Port for persisting the session snapshot
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Read the stored snapshot; an absent store yields an empty snapshot
    async fn load(&self) -> Result<SessionSnapshot, ApplicationError>;

    /// Replace the stored snapshot
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ApplicationError>;

    /// Remove every stored key
    async fn clear(&self) -> Result<(), ApplicationError>;
}
