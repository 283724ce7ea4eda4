//! Windows junction operations

use std::fs;
use std::io;
use std::os::windows::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// Create an NTFS junction at `link` that points to `target`
pub fn create_junction(target: &Path, link: &Path) -> io::Result<()> {
    junction::create(target, link)
}

/// Whether `path` itself is a junction (not followed)
pub fn is_junction(path: &Path) -> io::Result<bool> {
    junction::exists(path)
}

pub fn junction_target(path: &Path) -> io::Result<PathBuf> {
    junction::get_target(path)
}

/// Remove a file, junction or directory tree without following junctions
pub fn remove_tree(path: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_symlink_dir() {
        // Junctions and directory symlinks are removed as empty directories.
        fs::remove_dir(path)
    } else if file_type.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
