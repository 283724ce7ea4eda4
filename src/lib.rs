//! Scratch Fixtures - filesystem fixtures for tests
//!
//! This crate provides scratch directories and files, directory junctions,
//! recursive deletion and timed shell commands scoped to a scratch root, plus
//! runfiles resolution and native library loading for the tests that use them.

pub mod logging;
pub mod native;
pub mod runfiles;
pub mod scratch;
pub mod shell;
pub mod vfs;

pub use native::{ensure_loaded, NativeLibrary, NativeLoader};
pub use runfiles::Runfiles;
pub use scratch::{ScratchConfig, ScratchDir, ScratchError, ScratchHelper, Strategy};
pub use shell::{CommandLine, CommandOutput, Shell};
pub use vfs::{FileSystem, LocalFileSystem};
