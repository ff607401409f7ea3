//! Identity adapter - Implements IdentityPort using the users client

use application::{ApplicationError, IdentityPort, IssuedCredential};
use async_trait::async_trait;
use domain::User;
use integration_api::UsersClient;
use secrecy::SecretString;
use tracing::{debug, instrument};

use super::map_api_error;

/// Login and current-user lookup against the backend
#[derive(Debug, Clone)]
pub struct IdentityAdapter {
    users: UsersClient,
}

impl IdentityAdapter {
    /// Create the adapter
    pub const fn new(users: UsersClient) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityPort for IdentityAdapter {
    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IssuedCredential, ApplicationError> {
        let token = self
            .users
            .authenticate(username, password)
            .await
            .map_err(map_api_error)?;

        debug!(token_type = %token.token_type, "Token issued");
        Ok(IssuedCredential {
            access_token: SecretString::from(token.access_token),
            username: token.username.unwrap_or_else(|| username.to_string()),
            user_id: token.user_id,
        })
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<User, ApplicationError> {
        self.users.current().await.map_err(map_api_error)
    }
}
