//! Wire models that exist only at the HTTP boundary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Body of `POST /users/token`
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    /// Login name
    pub username: &'a str,
    /// Plain password
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response of `POST /users/token`
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    /// Bearer credential
    pub access_token: String,
    /// Always `bearer`
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Backend user id
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Username the credential was issued for
    #[serde(default)]
    pub username: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .finish()
    }
}

/// Acknowledgement returned by state-changing actions
///
/// Actions such as resolve, acknowledge and mark-read answer with a
/// confirmation message instead of the updated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAck {
    /// Confirmation text
    #[serde(default)]
    pub message: String,
}
