//! Native library loading
//!
//! Tests that call into native code load the library once per process through
//! [`ensure_loaded`]. A library that fails to load is not remembered, so every
//! test that needs it fails with the loader's error.
//!
//! The registry lock is not held while a library loads, so a loader may itself
//! call [`ensure_loaded`] for its dependencies. Concurrent callers for the same
//! library wait for the first load to finish.

pub mod error;
pub mod platform;

pub use error::NativeError;

use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

static LOADED: Lazy<Mutex<HashMap<String, Arc<OnceCell<()>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Something that can bring a native library into the process
pub trait NativeLoader {
    /// Stable identity used to load each library only once
    fn library_id(&self) -> String;

    fn load(&self) -> Result<(), NativeError>;
}

/// A shared library on disk (or a bare name searched by the OS loader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeLibrary {
    path: PathBuf,
}

impl NativeLibrary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the library through the runfiles of the current process
    pub fn from_runfile(logical_path: &str) -> Result<Self, NativeError> {
        Ok(Self::new(crate::runfiles::rlocation(logical_path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NativeLoader for NativeLibrary {
    fn library_id(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<(), NativeError> {
        platform::open_library(&self.path)
    }
}

/// Load `loader`'s library unless this process already has
pub fn ensure_loaded(loader: &dyn NativeLoader) -> Result<(), NativeError> {
    let id = loader.library_id();
    let slot = Arc::clone(
        LOADED
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id.clone())
            .or_default(),
    );

    if slot.get().is_some() {
        debug!(library = %id, "Native library already loaded");
        return Ok(());
    }

    slot.get_or_try_init(|| {
        loader.load()?;
        info!(library = %id, "Loaded native library");
        Ok::<(), NativeError>(())
    })?;
    Ok(())
}

pub fn is_loaded(library_id: &str) -> bool {
    LOADED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(library_id)
        .is_some_and(|slot| slot.get().is_some())
}
