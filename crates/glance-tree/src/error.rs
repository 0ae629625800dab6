use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("git error: {0}")]
    Git(#[from] glance_git::GitError),
    #[error("core error: {0}")]
    Core(#[from] glance_core::CoreError),
}
