//! Runfiles resolution
//!
//! Maps logical runfiles paths (`workspace/pkg/file`) to real files at test
//! time, either through a manifest of `<logical> <real>` lines or through a
//! runfiles directory tree.

pub mod error;

pub use error::RunfilesError;

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub const MANIFEST_FILE_VAR: &str = "RUNFILES_MANIFEST_FILE";
pub const RUNFILES_DIR_VAR: &str = "RUNFILES_DIR";
pub const TEST_SRCDIR_VAR: &str = "TEST_SRCDIR";
pub const JAVA_RUNFILES_VAR: &str = "JAVA_RUNFILES";

static PROCESS_RUNFILES: OnceCell<Runfiles> = OnceCell::new();

/// Resolve `path` against the runfiles of the current process.
///
/// The runfiles location is discovered on first use and cached.
pub fn rlocation(path: &str) -> Result<PathBuf, RunfilesError> {
    PROCESS_RUNFILES
        .get_or_try_init(Runfiles::create)?
        .rlocation(path)
}

#[derive(Debug, Clone)]
enum Mode {
    Manifest {
        path: PathBuf,
        entries: HashMap<String, PathBuf>,
    },
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Runfiles {
    mode: Mode,
}

impl Runfiles {
    /// Discover runfiles from the environment, then from the executable path
    pub fn create() -> Result<Self, RunfilesError> {
        Self::discover(|key| std::env::var_os(key), std::env::current_exe().ok())
    }

    fn discover(
        lookup: impl Fn(&str) -> Option<OsString>,
        executable: Option<PathBuf>,
    ) -> Result<Self, RunfilesError> {
        if let Some(manifest) = lookup(MANIFEST_FILE_VAR).map(PathBuf::from) {
            if manifest.is_file() {
                return Self::from_manifest(&manifest);
            }
        }

        for var in [RUNFILES_DIR_VAR, TEST_SRCDIR_VAR] {
            if let Some(dir) = lookup(var).map(PathBuf::from) {
                if dir.is_dir() {
                    return Self::from_directory(&dir);
                }
            }
        }

        if let Some(executable) = executable {
            let manifest = with_suffix(&executable, ".runfiles_manifest");
            if manifest.is_file() {
                return Self::from_manifest(&manifest);
            }

            let dir = with_suffix(&executable, ".runfiles");
            let nested_manifest = dir.join("MANIFEST");
            if nested_manifest.is_file() {
                return Self::from_manifest(&nested_manifest);
            }
            if dir.is_dir() {
                return Self::from_directory(&dir);
            }
        }

        Err(RunfilesError::NotConfigured)
    }

    pub fn from_manifest(path: &Path) -> Result<Self, RunfilesError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| RunfilesError::ManifestRead {
                path: path.display().to_string(),
                source,
            })?;
        let entries = parse_manifest(&content);
        debug!(manifest = %path.display(), entries = entries.len(), "Loaded runfiles manifest");

        Ok(Self {
            mode: Mode::Manifest {
                path: path.to_path_buf(),
                entries,
            },
        })
    }

    pub fn from_directory(path: &Path) -> Result<Self, RunfilesError> {
        if !path.is_dir() {
            return Err(RunfilesError::MissingDirectory {
                path: path.display().to_string(),
            });
        }
        Ok(Self {
            mode: Mode::Directory(path.to_path_buf()),
        })
    }

    /// Real location of the logical runfiles path `path`.
    ///
    /// Absolute paths are returned unchanged.
    pub fn rlocation(&self, path: &str) -> Result<PathBuf, RunfilesError> {
        validate(path)?;
        if Path::new(path).is_absolute() {
            return Ok(PathBuf::from(path));
        }

        let resolved = match &self.mode {
            Mode::Manifest { entries, .. } => lookup_manifest(entries, path),
            Mode::Directory(dir) => Some(dir.join(path)).filter(|p| p.exists()),
        };

        resolved.ok_or_else(|| RunfilesError::NotFound {
            path: path.to_string(),
        })
    }

    /// Environment a child process needs to find the same runfiles
    pub fn env_vars(&self) -> Vec<(&'static str, PathBuf)> {
        match &self.mode {
            Mode::Manifest { path, .. } => vec![(MANIFEST_FILE_VAR, path.clone())],
            Mode::Directory(dir) => vec![
                (RUNFILES_DIR_VAR, dir.clone()),
                (JAVA_RUNFILES_VAR, dir.clone()),
            ],
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

fn validate(path: &str) -> Result<(), RunfilesError> {
    let invalid = |reason: &str| RunfilesError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.is_empty() {
        return Err(invalid("path is empty"));
    }
    if Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(invalid("path must not contain '..'"));
    }
    Ok(())
}

fn parse_manifest(content: &str) -> HashMap<String, PathBuf> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((logical, real)) => (logical.to_string(), PathBuf::from(real)),
            None => (line.to_string(), PathBuf::new()),
        })
        .collect()
}

/// Exact match first, then the longest directory entry that prefixes `path`
fn lookup_manifest(entries: &HashMap<String, PathBuf>, path: &str) -> Option<PathBuf> {
    if let Some(real) = entries.get(path) {
        return Some(real.clone());
    }

    let mut prefix_end = path.len();
    while let Some(slash) = path[..prefix_end].rfind('/') {
        if let Some(real) = entries.get(&path[..slash]) {
            if !real.as_os_str().is_empty() {
                return Some(real.join(&path[slash + 1..]));
            }
        }
        prefix_end = slash;
    }
    None
}
