use thiserror::Error;

use crate::runfiles::RunfilesError;

/// Errors raised while loading a native library
#[derive(Error, Debug)]
pub enum NativeError {
    #[error("Failed to load native library {library}: {reason}")]
    LoadFailed { library: String, reason: String },

    #[error("Invalid native library path: {path}")]
    InvalidPath { path: String },

    #[error("Native library not found in runfiles: {0}")]
    Runfiles(#[from] RunfilesError),
}
