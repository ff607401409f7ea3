//! Errors of the local session store

use std::path::PathBuf;

use application::ApplicationError;
use thiserror::Error;

/// Failure reading or writing the session file
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Filesystem operation failed
    #[error("session file {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded
    #[error("session snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    /// No path configured and no per-user configuration directory
    #[error("no location for the session file; set session.path")]
    NoLocation,
}

impl SessionStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<SessionStoreError> for ApplicationError {
    fn from(err: SessionStoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
