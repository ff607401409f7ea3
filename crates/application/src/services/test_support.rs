//! Fakes shared by the service tests

use async_trait::async_trait;
use domain::{Role, User};
use parking_lot::Mutex;

use crate::error::ApplicationError;
use crate::ports::{SessionSnapshot, SessionStorePort};

/// In-memory store that counts writes
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<SessionSnapshot>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn with(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            saves: Mutex::new(0),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.lock().clone()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock()
    }
}

#[async_trait]
impl SessionStorePort for MemoryStore {
    async fn load(&self) -> Result<SessionSnapshot, ApplicationError> {
        Ok(self.snapshot.lock().clone())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ApplicationError> {
        *self.snapshot.lock() = snapshot.clone();
        *self.saves.lock() += 1;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApplicationError> {
        *self.snapshot.lock() = SessionSnapshot::default();
        Ok(())
    }
}

pub fn user_with_role(username: &str, role: Role) -> User {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "username": username,
        "email": format!("{username}@example.org"),
        "role": role,
        "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}
