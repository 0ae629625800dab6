use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use glance_core::{ObjectId, TreeRecord};

/// Key under which a tree's decoded records are cached.
pub fn tree_cache_key(project: &str, id: &ObjectId) -> String {
    format!("project|{}|tree|{}", project, id)
}

/// Shared cache of decoded entry records. Only records are persisted;
/// materialized content objects and path indices are rebuilt on demand.
pub trait ObjectCache {
    fn get(&self, key: &str) -> Option<Vec<TreeRecord>>;
    fn set(&self, key: &str, records: &[TreeRecord]);
}

/// In-process cache backed by a map.
#[derive(Default)]
pub struct MemoryObjectCache {
    entries: Mutex<HashMap<String, Vec<TreeRecord>>>,
}

impl MemoryObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectCache for MemoryObjectCache {
    fn get(&self, key: &str) -> Option<Vec<TreeRecord>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, records: &[TreeRecord]) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), records.to_vec());
    }
}
