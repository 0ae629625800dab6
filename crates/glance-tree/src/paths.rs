use std::collections::HashMap;

use glance_core::{ObjectId, RecordKind};
use glance_git::listing;

/// Flat path-to-hash maps spanning a whole subtree, built from one
/// recursive listing. Keys are repository-root-relative full paths.
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    trees: HashMap<String, ObjectId>,
    blobs: HashMap<String, ObjectId>,
}

impl PathIndex {
    /// Parses recursive listing text, keying each entry by
    /// `(kind, full path)`. Unknown kind words and noise lines are
    /// skipped, same as the shallow listing decode.
    pub fn parse(text: &str, base_path: &str) -> Self {
        let mut index = PathIndex::default();
        for record in listing::decode_listing(text, base_path) {
            match record.kind {
                RecordKind::Tree => index.trees.insert(record.path, record.id),
                RecordKind::Blob => index.blobs.insert(record.path, record.id),
            };
        }
        index
    }

    pub fn trees(&self) -> &HashMap<String, ObjectId> {
        &self.trees
    }

    pub fn blobs(&self) -> &HashMap<String, ObjectId> {
        &self.blobs
    }

    /// Resolves a repository-relative path to a hash, blobs before
    /// trees. Empty input never resolves.
    pub fn lookup(&self, path: &str) -> Option<ObjectId> {
        if path.is_empty() {
            return None;
        }
        self.blobs
            .get(path)
            .copied()
            .or_else(|| self.trees.get(path).copied())
    }
}
