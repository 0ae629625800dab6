use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CoreError;

/// Tree entry type bit: set when the entry is itself a tree.
const TREE_BIT: u32 = 0o040000;

/// Mode value marking a submodule (gitlink) entry.
const SUBMODULE_BITS: u32 = 0o160000;

/// File-system-style type/permission bits as carried by a tree entry.
/// The canonical textual form is six octal digits, zero-padded
/// ("040000", "100644").
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileMode(u32);

impl FileMode {
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Parses a run of octal digits as emitted in tree objects and
    /// `ls-tree` output. Width does not matter here; Display restores
    /// the canonical six-digit form.
    pub fn from_octal(s: &str) -> Result<Self, CoreError> {
        if s.is_empty() {
            return Err(CoreError::InvalidMode("empty".into()));
        }
        let bits =
            u32::from_str_radix(s, 8).map_err(|_| CoreError::InvalidMode(s.to_string()))?;
        Ok(Self(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The submodule mode also carries the tree bit, so check
    /// [`is_submodule`](Self::is_submodule) before this when the mode
    /// may come from an unfiltered source.
    pub fn is_tree(&self) -> bool {
        self.0 & TREE_BIT != 0
    }

    pub fn is_submodule(&self) -> bool {
        self.0 == SUBMODULE_BITS
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

impl fmt::Debug for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileMode({})", self)
    }
}
