//! Owned scratch root

use std::ops::Deref;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::config::ScratchConfig;
use super::helper::ScratchHelper;

/// A temporary scratch root that is removed on drop, plus a helper bound to it
pub struct ScratchDir {
    temp_dir: TempDir,
    helper: ScratchHelper,
}

impl ScratchDir {
    pub fn new() -> std::io::Result<Self> {
        Self::with_config(ScratchConfig::default())
    }

    pub fn with_config(config: ScratchConfig) -> std::io::Result<Self> {
        let temp_dir = tempfile::Builder::new().prefix("scratch_").tempdir()?;
        let helper = ScratchHelper::with_config(temp_dir.path(), config);
        Ok(Self { temp_dir, helper })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn helper(&self) -> &ScratchHelper {
        &self.helper
    }

    /// Keep the directory on disk after this value is dropped
    pub fn keep(self) -> PathBuf {
        self.temp_dir.keep()
    }
}

impl Deref for ScratchDir {
    type Target = ScratchHelper;

    fn deref(&self) -> &Self::Target {
        &self.helper
    }
}
