//! Timed command runner
//!
//! Every command gets exactly one process. The wait is bounded: when the
//! timeout elapses the child is killed and the call fails, it never reports
//! the exit status of a process that is still running. Dropping the future
//! returned by [`run_command`] also kills the child.
//!
//! Output is captured while waiting. Once the command exits, pipes still held
//! open by processes it left behind get a short grace period, after which the
//! output read so far is returned.

use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use super::command::CommandLine;
use super::error::CommandError;

/// How long a command may run before it is killed
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// How long output may stay open after the command itself has exited
const OUTPUT_GRACE: Duration = Duration::from_millis(250);

/// Captured result of a command that exited with status 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
}

/// Run `command`, wait at most `timeout` and require a zero exit code
pub async fn run_command(
    command: &CommandLine,
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    let rendered = command.to_string();
    debug!(command = %rendered, timeout_ms = timeout.as_millis() as u64, "Spawning command");

    let mut cmd = command.to_command();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| CommandError::Spawn {
        command: rendered.clone(),
        source,
    })?;

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();

    // Success is decided by the exit status alone. A background process that
    // inherited the pipes must not turn a finished command into a timeout.
    let status = {
        let drain = async {
            tokio::join!(
                read_pipe(stdout_pipe, &mut stdout_buf),
                read_pipe(stderr_pipe, &mut stderr_buf)
            )
        };
        tokio::pin!(drain);
        let mut drained = false;

        let exited = tokio::time::timeout(timeout, async {
            loop {
                tokio::select! {
                    status = child.wait() => break status,
                    _ = &mut drain, if !drained => drained = true,
                }
            }
        })
        .await;

        match exited {
            Ok(status) => {
                let status = status.map_err(|source| CommandError::Wait {
                    command: rendered.clone(),
                    source,
                })?;
                if !drained && tokio::time::timeout(OUTPUT_GRACE, &mut drain).await.is_err() {
                    debug!(command = %rendered, "Output still held open after exit, keeping what was read");
                }
                status
            }
            Err(_) => {
                if let Err(e) = child.start_kill() {
                    warn!(command = %rendered, error = %e, "Failed to kill timed out command");
                }
                warn!(command = %rendered, timeout_ms = timeout.as_millis() as u64, "Command timed out, killed");
                return Err(CommandError::TimedOut {
                    command: rendered,
                    timeout,
                });
            }
        }
    };

    let stdout = String::from_utf8_lossy(&stdout_buf).to_string();
    let stderr = String::from_utf8_lossy(&stderr_buf).to_string();

    if !status.success() {
        debug!(command = %rendered, status = %status, "Command failed");
        return Err(CommandError::Failed {
            command: rendered,
            status: status.to_string(),
            code: status.code(),
            stdout,
            stderr,
        });
    }

    Ok(CommandOutput {
        command: rendered,
        stdout,
        stderr,
    })
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>, buf: &mut Vec<u8>) {
    if let Some(mut pipe) = pipe {
        // A read error only truncates the captured output.
        let _ = pipe.read_to_end(buf).await;
    }
}

/// Blocking form of [`run_command`].
///
/// Drives the command on a private current-thread runtime. Inside an existing
/// tokio runtime that runtime lives on a scoped helper thread, so this is safe
/// to call from async tests too.
pub fn run_command_blocking(
    command: &CommandLine,
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return std::thread::scope(|scope| {
            scope
                .spawn(|| block_on_private_runtime(command, timeout))
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        });
    }
    block_on_private_runtime(command, timeout)
}

fn block_on_private_runtime(
    command: &CommandLine,
    timeout: Duration,
) -> Result<CommandOutput, CommandError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CommandError::Runtime)?;
    runtime.block_on(run_command(command, timeout))
}
