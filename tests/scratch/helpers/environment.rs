//! Scratch roots for integration tests

use scratch_fixtures::{ScratchConfig, ScratchDir, Shell, Strategy};
use std::time::Duration;

/// A scratch root using native links and removal
pub fn scratch_env() -> ScratchDir {
    scratch_fixtures::logging::init_test_tracing(false);
    ScratchDir::new().expect("Failed to create scratch root")
}

/// A scratch root that shells out for links and removal
pub fn shell_env() -> ScratchDir {
    scratch_fixtures::logging::init_test_tracing(false);
    let config = ScratchConfig::default()
        .with_link_strategy(Strategy::Shell)
        .with_delete_strategy(Strategy::Shell)
        .with_shell(Shell::host())
        .with_timeout(Duration::from_secs(10));
    ScratchDir::with_config(config).expect("Failed to create scratch root")
}
