//! Users and authentication

use domain::{NewUser, Page, User, UserUpdate};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::models::{AccessToken, LoginRequest};

const USERS: &str = "/users";

/// Client for `/users`
#[derive(Debug, Clone)]
pub struct UsersClient {
    gateway: ApiGateway,
}

impl UsersClient {
    /// Create the client
    pub const fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// List users (admin only on the backend)
    pub async fn list(&self, page: Page) -> Result<Vec<User>, ApiError> {
        self.gateway.list(USERS, page).await
    }

    /// Fetch one user
    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.gateway.get(&format!("{USERS}/{id}")).await
    }

    /// Register a user
    pub async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        self.gateway.post(USERS, user).await
    }

    /// Partially update a user
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        self.gateway.put(&format!("{USERS}/{id}"), update).await
    }

    /// Delete a user
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{USERS}/{id}")).await
    }

    /// Identity bound to the credential in use
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<User, ApiError> {
        self.gateway.get(&format!("{USERS}/current")).await
    }

    /// Exchange a username and password for a bearer credential
    ///
    /// Sent without stages, so a wrong password never resets an existing
    /// session.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AccessToken, ApiError> {
        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };
        self.gateway
            .post_anonymous(&format!("{USERS}/token"), &body)
            .await
    }
}
