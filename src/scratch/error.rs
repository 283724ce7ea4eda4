use thiserror::Error;

use crate::native::NativeError;
use crate::runfiles::RunfilesError;
use crate::shell::CommandError;

/// Errors returned by scratch helper operations
#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("Could not create junction '{link}' -> '{target}'")]
    JunctionMissing { link: String, target: String },

    #[error("Failed to create junction '{link}' -> '{target}': {source}")]
    LinkFailed {
        link: String,
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not valid UTF-8, cannot pass it to a shell: {path}")]
    NonUtf8Path { path: String },

    #[error("Failed to delete {path}: {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration value: {key} = {value} - {reason}")]
    InvalidConfig {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read configuration from {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ConfigParse {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Runfiles(#[from] RunfilesError),

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
