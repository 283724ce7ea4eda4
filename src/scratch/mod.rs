//! Scratch roots for filesystem tests
//!
//! [`ScratchHelper`] creates directories, files and junctions under a root it
//! does not own, deletes subtrees and runs commands with a bounded wait.
//! [`ScratchDir`] pairs a helper with a temporary root it does own.

pub mod config;
pub mod dir;
pub mod error;
pub mod helper;
pub mod platform;

pub use config::{ScratchConfig, Strategy};
pub use dir::ScratchDir;
pub use error::ScratchError;
pub use helper::ScratchHelper;
