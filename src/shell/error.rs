use std::time::Duration;
use thiserror::Error;

/// Errors raised while composing or running a command line
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Empty command line")]
    Empty,

    #[error("Failed to parse command line '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: shell_words::ParseError,
    },

    #[error("Argument cannot be quoted for {shell}: {argument}")]
    Unquotable { shell: String, argument: String },

    #[error("Failed to execute command; cmd: {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for command; cmd: {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command timed out after {}ms: {command}", .timeout.as_millis())]
    TimedOut { command: String, timeout: Duration },

    #[error("Command failed: {command} ({status})")]
    Failed {
        command: String,
        status: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to start command runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl CommandError {
    /// Exit code of a command that ran to completion and failed
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Failed { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CommandError::TimedOut { .. })
    }
}
