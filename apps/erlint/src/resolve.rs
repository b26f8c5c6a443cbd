//! Upward file/directory lookup starting from a source file.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Find `name` in the directory of `start_file` or the closest ancestor.
///
/// Returns the first existing `<dir>/<name>`; the walk ends at the
/// filesystem root. An empty `start_file` (an unsaved buffer) yields `None`.
pub fn find_upward(start_file: &Path, name: &str) -> Option<PathBuf> {
    if start_file.as_os_str().is_empty() {
        return None;
    }
    let mut dir = start_file.parent()?;
    loop {
        let candidate = dir.join(name);
        if candidate.exists() {
            debug!(name, path = %candidate.display(), "found");
            return Some(candidate);
        }
        match dir.parent() {
            Some(parent) if parent != dir => dir = parent,
            _ => {
                debug!(name, start = %start_file.display(), "not found up to root");
                return None;
            }
        }
    }
}

/// Join a relative path onto the working directory.
pub fn absolutize(p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(p))
        .unwrap_or_else(|_| p.to_path_buf())
}
