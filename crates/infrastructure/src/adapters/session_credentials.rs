//! Credential source backed by the session handle

use std::sync::Arc;

use application::SessionHandle;
use async_trait::async_trait;
use integration_api::CredentialSource;
use tracing::{debug, error, warn};

/// Feeds the gateway from the session and clears it on a refused credential
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    handle: Arc<SessionHandle>,
}

impl SessionCredentials {
    /// Wrap a session handle
    pub const fn new(handle: Arc<SessionHandle>) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl CredentialSource for SessionCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.handle.bearer_token()
    }

    async fn on_unauthorized(&self, refused: &str) {
        match self.handle.clear_if_current(refused).await {
            Ok(true) => warn!("Credential refused by backend, session cleared"),
            Ok(false) => debug!("Refused credential is no longer current"),
            Err(e) => error!(error = %e, "Failed to clear refused session"),
        }
    }
}
