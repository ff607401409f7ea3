//! Session snapshot persisted as a JSON file

use std::path::{Path, PathBuf};

use application::{ApplicationError, SessionSnapshot, SessionStorePort};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use super::SessionStoreError;

/// Stores the session snapshot in a single JSON file
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target. A file that cannot be decoded is treated as no session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<SessionSnapshot, SessionStoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionSnapshot::default());
            },
            Err(e) => return Err(SessionStoreError::io(&self.path, e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(SessionSnapshot::default())
            },
        }
    }

    async fn write(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionStoreError::io(parent, e))?;
        }

        let encoded = serde_json::to_vec_pretty(snapshot)?;
        let staging = self.path.with_extension("json.tmp");
        write_private(&staging, &encoded).await?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| SessionStoreError::io(&self.path, e))
    }

    async fn remove(&self) -> Result<(), SessionStoreError> {
        remove_if_present(&self.path).await
    }
}

async fn remove_if_present(path: &Path) -> Result<(), SessionStoreError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionStoreError::io(path, e)),
    }
}

/// Create `path` owner-only (0600 on unix) and write `bytes` into it
///
/// A leftover file from an interrupted write is removed first so the
/// mode applies from creation.
async fn write_private(path: &Path, bytes: &[u8]) -> Result<(), SessionStoreError> {
    remove_if_present(path).await?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options
        .open(path)
        .await
        .map_err(|e| SessionStoreError::io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| SessionStoreError::io(path, e))?;
    file.sync_all()
        .await
        .map_err(|e| SessionStoreError::io(path, e))
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<SessionSnapshot, ApplicationError> {
        let snapshot = self.read().await?;
        debug!(empty = snapshot.is_empty(), "Session file loaded");
        Ok(snapshot)
    }

    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ApplicationError> {
        self.write(snapshot).await?;
        debug!("Session file written");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<(), ApplicationError> {
        self.remove().await?;
        debug!("Session file removed");
        Ok(())
    }
}
