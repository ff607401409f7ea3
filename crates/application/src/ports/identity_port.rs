//! Identity port
//!
//! Authentication against the backend and retrieval of the identity bound
//! to the current credential.

use std::fmt;

use async_trait::async_trait;
use domain::User;
#[cfg(test)]
use mockall::automock;
use secrecy::SecretString;

use crate::error::ApplicationError;

/// Credential issued by a successful authentication
pub struct IssuedCredential {
    /// Bearer token
    pub access_token: SecretString,
    /// Username the backend issued it for
    pub username: String,
    /// Backend user id, when reported
    pub user_id: Option<i64>,
}

impl fmt::Debug for IssuedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedCredential")
            .field("access_token", &"[REDACTED]")
            .field("username", &self.username)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Port for authentication and identity lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Exchange a username and password for a credential
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IssuedCredential, ApplicationError>;

    /// Identity bound to the credential currently in use
    async fn current_user(&self) -> Result<User, ApplicationError>;
}
