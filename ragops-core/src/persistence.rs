//! Atomic file writes.
//!
//! Content is written to a `.tmp` sibling and renamed over the target, so a
//! reader sees either the previous file or the complete new one.

use std::io;
use std::path::{Path, PathBuf};

/// Atomically write raw bytes to a file.
///
/// Creates parent directories if they don't exist. On failure the temporary
/// file is removed and the target is left untouched.
pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let result = std::fs::write(&tmp, data).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
