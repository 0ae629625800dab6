use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glance_core::{FileMode, ObjectId, TreeRecord};
use glance_git::{listing, raw, ListingOptions};

use crate::cache::tree_cache_key;
use crate::contents::{materialize, ObjectResolver, TreeItem};
use crate::error::TreeError;
use crate::paths::PathIndex;
use crate::RepoContext;

/// A directory node of the repository being browsed.
///
/// Identity is the tree hash; the path is where this node currently
/// sits in an enclosing tree and may be reassigned, since one hash can
/// appear at several locations. Entry records and the recursive path
/// index are loaded lazily and independently of each other; both gates
/// share one lock, so concurrent first accesses against a shared
/// instance serialize into a single retrieval.
pub struct Tree {
    id: ObjectId,
    ctx: Arc<RepoContext>,
    state: Mutex<TreeState>,
}

#[derive(Default, Clone)]
struct TreeState {
    path: String,
    mode: Option<FileMode>,
    commit: Option<ObjectId>,
    records: Option<Vec<TreeRecord>>,
    index: Option<PathIndex>,
}

impl Tree {
    pub fn new(ctx: Arc<RepoContext>, id: ObjectId) -> Self {
        Self {
            id,
            ctx,
            state: Mutex::new(TreeState::default()),
        }
    }

    pub fn with_path(ctx: Arc<RepoContext>, id: ObjectId, path: &str) -> Self {
        let tree = Self::new(ctx, id);
        tree.state().path = path.to_string();
        tree
    }

    fn state(&self) -> MutexGuard<'_, TreeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn path(&self) -> String {
        self.state().path.clone()
    }

    /// Moves this node to a new path. The recursive path index is keyed
    /// by path, so a previously built index is dropped and rebuilt on
    /// next use. Already-decoded entry records keep the paths computed
    /// under the old location; they are not rewritten.
    pub fn set_path(&self, path: &str) {
        let mut state = self.state();
        if state.path == path {
            return;
        }
        if state.index.is_some() {
            tracing::debug!(tree = %self.id, path, "path changed, dropping stale path index");
            state.index = None;
        }
        state.path = path.to_string();
    }

    pub fn mode(&self) -> Option<FileMode> {
        self.state().mode
    }

    pub fn set_mode(&self, mode: FileMode) {
        self.state().mode = Some(mode);
    }

    pub fn commit(&self) -> Option<ObjectId> {
        self.state().commit
    }

    pub fn set_commit(&self, commit: ObjectId) {
        self.state().commit = Some(commit);
    }

    pub fn cache_key(&self) -> String {
        tree_cache_key(self.ctx.project(), &self.id)
    }

    /// An independent node with the same identity and a copy of the
    /// current state, for attaching one tree hash at a second location.
    pub fn detached_copy(&self) -> Tree {
        Tree {
            id: self.id,
            ctx: Arc::clone(&self.ctx),
            state: Mutex::new(self.state().clone()),
        }
    }

    /// The decoded entry records, one level deep, in object order.
    ///
    /// Decoded once per instance: later calls return the stored list.
    /// The shared cache is consulted first so another node with the
    /// same hash short-circuits the decode, and written through after
    /// a decode so it can.
    pub fn records(&self) -> Result<Vec<TreeRecord>, TreeError> {
        let mut state = self.state();
        if let Some(records) = &state.records {
            return Ok(records.clone());
        }

        let key = self.cache_key();
        if let Some(records) = self.ctx.cache().get(&key) {
            tracing::debug!(%key, "tree record cache hit");
            state.records = Some(records.clone());
            return Ok(records);
        }

        let caps = self.ctx.source().capabilities();
        let records = if caps.raw_objects {
            let data = self.ctx.source().read_object(&self.id)?;
            raw::decode_tree_object(&data, &state.path)?
        } else {
            let opts = ListingOptions {
                recursive: false,
                with_sizes: caps.listing_sizes,
            };
            let text = self.ctx.source().ls_tree(&self.id, opts)?;
            listing::decode_listing(&text, &state.path)
        };
        tracing::debug!(tree = %self.id, entries = records.len(), "decoded tree");

        self.ctx.cache().set(&key, &records);
        state.records = Some(records.clone());
        Ok(records)
    }

    /// Materialized content objects for the entries, rebuilt on every
    /// call from the stored records.
    pub fn contents(&self, resolver: &dyn ObjectResolver) -> Result<Vec<TreeItem>, TreeError> {
        let records = self.records()?;
        let commit = self.commit();
        materialize(&records, commit, resolver)
    }

    fn index_locked<'a>(
        &self,
        state: &'a mut TreeState,
    ) -> Result<&'a mut PathIndex, TreeError> {
        let index = match state.index.take() {
            Some(index) => index,
            None => {
                let opts = ListingOptions {
                    recursive: true,
                    with_sizes: false,
                };
                let text = self.ctx.source().ls_tree(&self.id, opts)?;
                let index = PathIndex::parse(&text, &state.path);
                tracing::debug!(
                    tree = %self.id,
                    trees = index.trees().len(),
                    blobs = index.blobs().len(),
                    "built recursive path index"
                );
                index
            }
        };
        Ok(state.index.insert(index))
    }

    /// Full-path to hash map for every subtree under this node.
    pub fn tree_paths(&self) -> Result<HashMap<String, ObjectId>, TreeError> {
        let mut state = self.state();
        let index = self.index_locked(&mut state)?;
        Ok(index.trees().clone())
    }

    /// Full-path to hash map for every blob under this node.
    pub fn blob_paths(&self) -> Result<HashMap<String, ObjectId>, TreeError> {
        let mut state = self.state();
        let index = self.index_locked(&mut state)?;
        Ok(index.blobs().clone())
    }

    /// Resolves a repository-relative path anywhere under this node to
    /// its hash. Empty input resolves to nothing without touching the
    /// index.
    pub fn path_to_hash(&self, path: &str) -> Result<Option<ObjectId>, TreeError> {
        if path.is_empty() {
            return Ok(None);
        }
        let mut state = self.state();
        let index = self.index_locked(&mut state)?;
        Ok(index.lookup(path))
    }
}
