use std::collections::HashSet;
use std::sync::Arc;

use glance_core::{FileMode, ObjectId, RecordKind, TreeRecord};

use crate::blob::Blob;
use crate::error::TreeError;
use crate::tree::Tree;

/// A materialized directory entry.
pub enum TreeItem {
    Tree(Arc<Tree>),
    Blob(Arc<Blob>),
}

impl TreeItem {
    pub fn id(&self) -> ObjectId {
        match self {
            TreeItem::Tree(t) => t.id(),
            TreeItem::Blob(b) => b.id(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            TreeItem::Tree(t) => t.path(),
            TreeItem::Blob(b) => b.path(),
        }
    }

    pub fn mode(&self) -> Option<FileMode> {
        match self {
            TreeItem::Tree(t) => t.mode(),
            TreeItem::Blob(b) => b.mode(),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, TreeItem::Tree(_))
    }
}

/// Resolves a hash to the canonical content object instance for it,
/// typically memoized per repository so repeated lookups of one hash
/// return the same instance.
pub trait ObjectResolver {
    fn tree(&self, id: &ObjectId) -> Result<Arc<Tree>, TreeError>;
    fn blob(&self, id: &ObjectId) -> Result<Arc<Blob>, TreeError>;
}

/// Turns decoded records into content objects, in record order.
///
/// The first record carrying a given hash gets the canonical instance
/// from the resolver; later records carrying the same hash get a
/// detached copy, so per-location metadata never bleeds between
/// entries that share content.
pub(crate) fn materialize(
    records: &[TreeRecord],
    commit: Option<ObjectId>,
    resolver: &dyn ObjectResolver,
) -> Result<Vec<TreeItem>, TreeError> {
    let mut items = Vec::with_capacity(records.len());
    let mut used_trees: HashSet<ObjectId> = HashSet::new();
    let mut used_blobs: HashSet<ObjectId> = HashSet::new();

    for record in records {
        match record.kind {
            RecordKind::Tree => {
                let canonical = resolver.tree(&record.id)?;
                let tree = if used_trees.insert(record.id) {
                    canonical
                } else {
                    Arc::new(canonical.detached_copy())
                };

                if !record.mode.is_zero() {
                    tree.set_mode(record.mode);
                }
                if !record.path.is_empty() {
                    tree.set_path(&record.path);
                }
                if let Some(commit) = commit {
                    tree.set_commit(commit);
                }
                items.push(TreeItem::Tree(tree));
            }
            RecordKind::Blob => {
                let canonical = resolver.blob(&record.id)?;
                let blob = if used_blobs.insert(record.id) {
                    canonical
                } else {
                    Arc::new(canonical.detached_copy())
                };

                if let Some(size) = record.size {
                    blob.set_size(size);
                }
                if !record.mode.is_zero() {
                    blob.set_mode(record.mode);
                }
                if !record.path.is_empty() {
                    blob.set_path(&record.path);
                }
                if let Some(commit) = commit {
                    blob.set_commit(commit);
                }
                items.push(TreeItem::Blob(blob));
            }
        }
    }

    Ok(items)
}
