use glance_core::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("tree object truncated at byte {offset}")]
    TruncatedObject { offset: usize },
    #[error("malformed tree entry at byte {offset}")]
    MalformedEntry { offset: usize },
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("git execution failed: {0}")]
    Exec(String),
    #[error("core error: {0}")]
    Core(#[from] glance_core::CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
