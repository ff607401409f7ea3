//! Persistence adapters for the client session

mod file_session_store;
mod memory_session_store;
mod session_error;

pub use file_session_store::FileSessionStore;
pub use memory_session_store::MemorySessionStore;
pub use session_error::SessionStoreError;
