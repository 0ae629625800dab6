use glance_core::{FileMode, ObjectId, RecordKind, TreeRecord};

use crate::GitError;

/// Raw SHA-1 identifier length inside a tree entry.
const ID_LEN: usize = 20;

/// Decodes a raw tree object payload into entry records.
///
/// The payload is a sequence of `<octal-mode> <name>\0<20-byte-id>`
/// records with no framing between them. Entry names are prefixed with
/// `base_path` when one is given. Submodule entries are dropped.
///
/// An empty payload decodes to an empty list; a payload that ends in
/// the middle of a record is structural corruption and fails.
pub fn decode_tree_object(data: &[u8], base_path: &str) -> Result<Vec<TreeRecord>, GitError> {
    let mut records = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let start = pos;

        let space = data[pos..]
            .iter()
            .position(|&b| b == b' ')
            .ok_or(GitError::TruncatedObject { offset: start })?;
        let mode_str = std::str::from_utf8(&data[pos..pos + space])
            .map_err(|_| GitError::MalformedEntry { offset: start })?;
        let mode = FileMode::from_octal(mode_str)
            .map_err(|_| GitError::MalformedEntry { offset: start })?;
        pos += space + 1;

        let nul = data[pos..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(GitError::TruncatedObject { offset: start })?;
        let name = std::str::from_utf8(&data[pos..pos + nul])
            .map_err(|_| GitError::MalformedEntry { offset: start })?;
        pos += nul + 1;

        if data.len() < pos + ID_LEN {
            return Err(GitError::TruncatedObject { offset: start });
        }
        let id = ObjectId::from_raw(&data[pos..pos + ID_LEN])?;
        pos += ID_LEN;

        // Submodules are not supported; skip the entry, keep scanning.
        if mode.is_submodule() {
            continue;
        }

        let kind = if mode.is_tree() {
            RecordKind::Tree
        } else {
            RecordKind::Blob
        };

        let path = if base_path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", base_path, name)
        };

        records.push(TreeRecord {
            path,
            mode,
            kind,
            id,
            size: None,
        });
    }

    Ok(records)
}
