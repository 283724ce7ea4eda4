use thiserror::Error;

/// Errors raised while locating or resolving runfiles
#[derive(Error, Debug)]
pub enum RunfilesError {
    #[error("Runfiles not found: set RUNFILES_MANIFEST_FILE or RUNFILES_DIR")]
    NotConfigured,

    #[error("Invalid runfiles path: '{path}' - {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Runfile not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read runfiles manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Runfiles directory does not exist: {path}")]
    MissingDirectory { path: String },
}
