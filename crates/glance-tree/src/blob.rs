use std::sync::{Mutex, MutexGuard, PoisonError};

use glance_core::{FileMode, ObjectId};

/// A file-like content object: an immutable identity plus the metadata
/// it carries at one location in a tree (path, mode, reported size,
/// owning commit). The same hash can sit at several paths, each with
/// its own metadata; see [`Blob::detached_copy`].
pub struct Blob {
    id: ObjectId,
    state: Mutex<BlobState>,
}

#[derive(Default, Clone)]
struct BlobState {
    path: String,
    mode: Option<FileMode>,
    size: Option<u64>,
    commit: Option<ObjectId>,
}

impl Blob {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            state: Mutex::new(BlobState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, BlobState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn path(&self) -> String {
        self.state().path.clone()
    }

    pub fn set_path(&self, path: &str) {
        self.state().path = path.to_string();
    }

    pub fn mode(&self) -> Option<FileMode> {
        self.state().mode
    }

    pub fn set_mode(&self, mode: FileMode) {
        self.state().mode = Some(mode);
    }

    pub fn size(&self) -> Option<u64> {
        self.state().size
    }

    pub fn set_size(&self, size: u64) {
        self.state().size = Some(size);
    }

    pub fn commit(&self) -> Option<ObjectId> {
        self.state().commit
    }

    pub fn set_commit(&self, commit: ObjectId) {
        self.state().commit = Some(commit);
    }

    /// An independent instance with the same identity and a copy of the
    /// current metadata. Mutations on the copy never reach the original.
    pub fn detached_copy(&self) -> Blob {
        Blob {
            id: self.id,
            state: Mutex::new(self.state().clone()),
        }
    }
}
