use serde::{Deserialize, Serialize};

use crate::id::ObjectId;
use crate::mode::FileMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Tree,
    Blob,
}

/// One decoded directory entry. Submodule entries are dropped during
/// decode and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRecord {
    /// Entry path, already prefixed with the parent tree's path when
    /// the parent has one.
    pub path: String,
    pub mode: FileMode,
    pub kind: RecordKind,
    pub id: ObjectId,
    /// Byte length as reported by the listing source. `None` when the
    /// source did not report one, which is distinct from zero.
    pub size: Option<u64>,
}
