//! Path handles for filesystem abstractions

use std::path::PathBuf;

/// A filesystem abstraction that can mint its own path type from a string
pub trait FileSystem {
    type Path;

    fn get_path(&self, path: &str) -> Self::Path;
}

/// The host filesystem, with `PathBuf` handles
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    type Path = PathBuf;

    fn get_path(&self, path: &str) -> PathBuf {
        PathBuf::from(path)
    }
}
