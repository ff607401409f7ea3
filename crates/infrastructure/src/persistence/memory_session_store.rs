//! In-memory session store

use application::{ApplicationError, SessionSnapshot, SessionStorePort};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Keeps the snapshot for the lifetime of the process only
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    snapshot: Mutex<SessionSnapshot>,
}

impl MemorySessionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `snapshot`
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.lock().clone()
    }
}

#[async_trait]
impl SessionStorePort for MemorySessionStore {
    async fn load(&self) -> Result<SessionSnapshot, ApplicationError> {
        Ok(self.snapshot())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ApplicationError> {
        *self.snapshot.lock() = snapshot.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApplicationError> {
        *self.snapshot.lock() = SessionSnapshot::default();
        Ok(())
    }
}
