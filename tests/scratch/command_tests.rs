//! Timed command tests

use super::scratch_env;
use scratch_fixtures::shell::CommandError;
use scratch_fixtures::{ScratchConfig, ScratchDir, ScratchError, Shell};
use std::time::{Duration, Instant};

fn succeeding_script() -> &'static str {
    if cfg!(windows) {
        "exit 0"
    } else {
        "true"
    }
}

#[test]
fn test_zero_exit_returns_normally() -> anyhow::Result<()> {
    let env = scratch_env();

    env.run(&Shell::host().script(succeeding_script()))?;
    Ok(())
}

#[test]
fn test_non_zero_exit_fails() {
    let env = scratch_env();

    let err = env.run(&Shell::host().script("exit 7")).unwrap_err();

    match &err {
        ScratchError::Command(command_err) => {
            assert_eq!(command_err.exit_code(), Some(7));
            assert!(err.to_string().starts_with("Command failed: "));
        }
        other => panic!("Expected Command error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_run_command_string() -> anyhow::Result<()> {
    let env = scratch_env();
    let target = env.path().join("made by command");

    env.run_command(&format!("mkdir -p '{}'", target.display()))?;

    assert!(target.is_dir());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_run_args_joins_tokens() -> anyhow::Result<()> {
    let env = scratch_env();

    let output = env.run_args(["sh -c", "'echo $((6 * 7))'"])?;

    assert_eq!(output.stdout.trim(), "42");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_timeout_fails_instead_of_hanging() {
    let config = ScratchConfig::default().with_timeout(Duration::from_millis(300));
    let env = ScratchDir::with_config(config).unwrap();
    let start = Instant::now();

    let err = env.run_command("sleep 30").unwrap_err();

    assert!(matches!(
        err,
        ScratchError::Command(CommandError::TimedOut { .. })
    ));
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[cfg(unix)]
#[test]
fn test_unparseable_command_line() {
    let env = scratch_env();

    let err = env.run_command("echo \"unterminated").unwrap_err();

    assert!(matches!(err, ScratchError::Command(CommandError::Parse { .. })));
}

#[test]
fn test_missing_program() {
    let env = scratch_env();

    let err = env.run_command("no-such-program-for-scratch-tests").unwrap_err();

    assert!(matches!(err, ScratchError::Command(CommandError::Spawn { .. })));
}

#[tokio::test]
async fn test_blocking_helper_inside_async_test() -> anyhow::Result<()> {
    let env = scratch_env();

    env.run(&Shell::host().script(succeeding_script()))?;
    Ok(())
}
