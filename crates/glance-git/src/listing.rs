use glance_core::{FileMode, ObjectId, RecordKind, TreeRecord};

/// Decodes `ls-tree`-style listing text into entry records.
///
/// Expected line shape: `<mode> <kind> <40-hex-id>[ <size>| -]\t<name>`.
/// Lines that do not fit (blank trailing lines from splitting, unknown
/// kind words such as `commit`) are skipped, never an error. The result
/// is interchangeable with what the raw decoder produces for the
/// equivalent object.
pub fn decode_listing(text: &str, base_path: &str) -> Vec<TreeRecord> {
    text.lines()
        .filter_map(|line| parse_line(line, base_path))
        .collect()
}

fn parse_line(line: &str, base_path: &str) -> Option<TreeRecord> {
    let (meta, name) = line.split_once('\t')?;

    let mut fields = meta.split_whitespace();
    let mode = FileMode::from_octal(fields.next()?).ok()?;
    let kind_word = fields.next()?;
    let hex = fields.next()?;
    if hex.len() != 40 {
        return None;
    }
    let id = ObjectId::from_hex(hex).ok()?;
    let size_col = fields.next();
    if fields.next().is_some() {
        return None;
    }

    let (kind, size) = match kind_word {
        "tree" => (RecordKind::Tree, None),
        // A size column of "-" or nothing at all both mean the source
        // reported no size; never default to zero.
        "blob" => (
            RecordKind::Blob,
            size_col.and_then(|s| s.trim().parse::<u64>().ok()),
        ),
        _ => return None,
    };

    if name.is_empty() {
        return None;
    }

    let path = if base_path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base_path, name)
    };

    Some(TreeRecord {
        path,
        mode,
        kind,
        id,
        size,
    })
}
