//! Unix link operations
//!
//! Unix has no junctions; a directory symlink is the closest equivalent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Create a directory link at `link` that points to `target`
pub fn create_junction(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

/// Whether `path` itself is a directory link (not followed)
pub fn is_junction(path: &Path) -> io::Result<bool> {
    Ok(fs::symlink_metadata(path)?.file_type().is_symlink())
}

pub fn junction_target(path: &Path) -> io::Result<PathBuf> {
    fs::read_link(path)
}

/// Remove a file, link or directory tree without following links
pub fn remove_tree(path: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
