//! Scratch helper: filesystem and process primitives scoped to one root

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::{ScratchConfig, Strategy};
use super::error::ScratchError;
use super::platform;
use crate::native::{self, NativeError, NativeLoader};
use crate::runfiles::{self, RunfilesError};
use crate::shell::{run_command_blocking, CommandLine, CommandOutput};
use crate::vfs::FileSystem;

/// Test fixture primitives resolved against a scratch root.
///
/// The root is owned by the caller. The helper only joins paths onto it and
/// deletes it when [`ScratchHelper::delete_all_under`] is called with an
/// empty path.
#[derive(Debug, Clone)]
pub struct ScratchHelper {
    root: PathBuf,
    config: ScratchConfig,
}

impl ScratchHelper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, ScratchConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ScratchConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    /// `root/path`, or the root itself for an empty path
    pub fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }

    /// Make sure a native library is loaded; later calls are no-ops
    pub fn load_native(&self, loader: &dyn NativeLoader) -> Result<(), NativeError> {
        native::ensure_loaded(loader)
    }

    /// Create directory junctions, then check that every link is one.
    ///
    /// Each pair is `(link, target)`, both relative to the root. An empty
    /// set of pairs does nothing.
    pub fn create_junctions<I, K, V>(&self, links: I) -> Result<(), ScratchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let links: Vec<(String, String)> = links
            .into_iter()
            .map(|(link, target)| (link.as_ref().to_string(), target.as_ref().to_string()))
            .collect();
        if links.is_empty() {
            return Ok(());
        }

        match self.config.link_strategy {
            Strategy::Native => {
                for (link, target) in &links {
                    let link_path = self.resolve(link);
                    let target_path = self.resolve(target);
                    if let Some(parent) = link_path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    platform::create_junction(&target_path, &link_path).map_err(|source| {
                        ScratchError::LinkFailed {
                            link: link.clone(),
                            target: target.clone(),
                            source,
                        }
                    })?;
                    debug!(link = %link_path.display(), target = %target_path.display(), "Created junction");
                }
            }
            Strategy::Shell => {
                let root = shell_path(&self.root)?;
                let command = self.config.shell.junction_batch(root, links.iter().cloned())?;
                self.run(&command)?;
            }
        }

        self.verify_junctions(links.iter().map(|(link, target)| (link, target)))?;
        info!(count = links.len(), root = %self.root.display(), "Created junctions");
        Ok(())
    }

    /// Check that every `link` is a junction, dangling or not.
    ///
    /// Fails with the first pair whose link is missing or is not a junction.
    pub fn verify_junctions<I, K, V>(&self, links: I) -> Result<(), ScratchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (link, target) in links {
            let (link, target) = (link.as_ref(), target.as_ref());
            if !platform::is_junction(&self.resolve(link)).unwrap_or(false) {
                return Err(ScratchError::JunctionMissing {
                    link: link.to_string(),
                    target: target.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Recursively delete `root/path` (the root itself for an empty path).
    ///
    /// Links are removed, never followed. Nothing there is not an error.
    pub fn delete_all_under(&self, path: &str) -> Result<(), ScratchError> {
        let location = self.resolve(path);
        if fs::symlink_metadata(&location).is_err() {
            debug!(path = %location.display(), "Nothing to delete");
            return Ok(());
        }

        match self.config.delete_strategy {
            Strategy::Native => {
                platform::remove_tree(&location).map_err(|source| ScratchError::DeleteFailed {
                    path: location.display().to_string(),
                    source,
                })?;
            }
            Strategy::Shell => {
                let command = self.config.shell.recursive_delete(shell_path(&location)?)?;
                self.run(&command)?;
            }
        }

        debug!(path = %location.display(), "Deleted");
        Ok(())
    }

    /// Create `root/path` and any missing parents
    pub fn scratch_dir(&self, path: &str) -> io::Result<PathBuf> {
        let dir_path = self.resolve(path);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write `lines` to `root/path`, each followed by `\n`, replacing any
    /// existing content. Missing parent directories are created.
    pub fn scratch_file<I, S>(&self, path: &str, lines: I) -> io::Result<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let file_path = self.resolve(path);

        // Create parent directories if they don't exist
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = io::BufWriter::new(fs::File::create(&file_path)?);
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        Ok(file_path)
    }

    /// Run a single command string with the configured timeout
    pub fn run_command(&self, line: &str) -> Result<CommandOutput, ScratchError> {
        self.run(&CommandLine::parse(line)?)
    }

    /// Run a command given as tokens joined with spaces
    pub fn run_args<I, S>(&self, tokens: I) -> Result<CommandOutput, ScratchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(&CommandLine::from_tokens(tokens)?)
    }

    pub fn run(&self, command: &CommandLine) -> Result<CommandOutput, ScratchError> {
        Ok(run_command_blocking(command, self.config.command_timeout())?)
    }

    /// Resolve a runfiles-relative path for the current process
    pub fn runfile(&self, path: &str) -> Result<PathBuf, RunfilesError> {
        runfiles::rlocation(path)
    }

    /// Path handle for `root/path` in `fs`; no I/O
    pub fn create_vfs_path<F: FileSystem>(&self, fs: &F, path: &str) -> F::Path {
        fs.get_path(&format!("{}/{path}", self.root.display()))
    }

    /// Whether `root/path` is a junction (a directory symlink on Unix)
    pub fn is_junction(&self, path: &str) -> io::Result<bool> {
        platform::is_junction(&self.resolve(path))
    }

    pub fn junction_target(&self, path: &str) -> io::Result<PathBuf> {
        platform::junction_target(&self.resolve(path))
    }
}

/// A path as shell text; non-UTF-8 paths would name a different file
fn shell_path(path: &Path) -> Result<&str, ScratchError> {
    path.to_str().ok_or_else(|| ScratchError::NonUtf8Path {
        path: path.display().to_string(),
    })
}
