use std::path::Path;

use ogaget_format::{layout, Record};

use crate::error::{Error, Result};

/// Format file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    use humansize::{FormatSize, BINARY};
    bytes.format_size(BINARY)
}

/// The name media files take after their credit file: `tree.txt` gives `tree`.
pub fn credit_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::CreditName {
            path: path.to_path_buf(),
        })
}

/// `png` and `.png` both mean `.png`.
pub fn dotted(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Canonical key order for writing `record` back. Keys the file did not have
/// yet are placed after the ones it had.
pub fn write_order(ordered_keys: &[String], record: &Record) -> Vec<String> {
    let mut keys = ordered_keys.to_vec();
    keys.extend(record.keys().filter(|k| !ordered_keys.contains(*k)).cloned());
    layout::canonical_order(&keys)
}
