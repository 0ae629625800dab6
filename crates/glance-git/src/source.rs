use glance_core::ObjectId;

use crate::GitError;

/// What the underlying repository access layer can do. Decides which
/// decode path a tree takes and whether listings carry blob sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Raw object payloads can be read directly, without going through
    /// the listing tool.
    pub raw_objects: bool,
    /// The listing tool can report blob sizes (`-l`).
    pub listing_sizes: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOptions {
    /// Recurse into subtrees, emitting full paths.
    pub recursive: bool,
    /// Include the blob size column.
    pub with_sizes: bool,
}

/// Access to tree data for one repository. Implementations typically
/// shell out to git or read an object database; either way a failure is
/// returned as-is to whichever accessor triggered the retrieval.
pub trait GitSource {
    fn capabilities(&self) -> Capabilities;

    /// Returns the raw payload of a tree object, header stripped.
    fn read_object(&self, id: &ObjectId) -> Result<Vec<u8>, GitError>;

    /// Returns `ls-tree`-style listing text for a tree, one entry per
    /// line, tree entries included.
    fn ls_tree(&self, id: &ObjectId, opts: ListingOptions) -> Result<String, GitError>;
}
