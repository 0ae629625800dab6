pub mod blob;
pub mod cache;
pub mod contents;
pub mod error;
pub mod paths;
pub mod tree;

pub use blob::Blob;
pub use cache::{tree_cache_key, MemoryObjectCache, ObjectCache};
pub use contents::{ObjectResolver, TreeItem};
pub use error::TreeError;
pub use paths::PathIndex;
pub use tree::Tree;

use std::sync::Arc;

use glance_git::GitSource;

/// Everything a tree node needs from the repository it belongs to:
/// an identity for cache keys, object access, and the shared record
/// cache. Passed in explicitly; nothing here is process-global.
pub struct RepoContext {
    project: String,
    source: Arc<dyn GitSource + Send + Sync>,
    cache: Arc<dyn ObjectCache + Send + Sync>,
}

impl RepoContext {
    pub fn new(
        project: impl Into<String>,
        source: Arc<dyn GitSource + Send + Sync>,
        cache: Arc<dyn ObjectCache + Send + Sync>,
    ) -> Self {
        Self {
            project: project.into(),
            source,
            cache,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn source(&self) -> &(dyn GitSource + Send + Sync) {
        self.source.as_ref()
    }

    pub fn cache(&self) -> &(dyn ObjectCache + Send + Sync) {
        self.cache.as_ref()
    }
}
