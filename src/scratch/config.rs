//! Scratch helper configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ScratchError;
use crate::shell::{Shell, DEFAULT_COMMAND_TIMEOUT};

pub const TIMEOUT_ENV: &str = "SCRATCH_COMMAND_TIMEOUT_SECS";
pub const LINK_STRATEGY_ENV: &str = "SCRATCH_LINK_STRATEGY";
pub const DELETE_STRATEGY_ENV: &str = "SCRATCH_DELETE_STRATEGY";
pub const SHELL_ENV: &str = "SCRATCH_SHELL";

/// How links are created and trees are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Direct OS calls
    #[default]
    Native,
    /// One composite interpreter invocation
    Shell,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(Strategy::Native),
            "shell" => Ok(Strategy::Shell),
            _ => Err(format!("Invalid strategy: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    pub command_timeout_ms: u64,
    pub link_strategy: Strategy,
    pub delete_strategy: Strategy,
    pub shell: Shell,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT.as_millis() as u64,
            link_strategy: Strategy::Native,
            delete_strategy: Strategy::Native,
            shell: Shell::host(),
        }
    }
}

impl ScratchConfig {
    /// Defaults overridden by `SCRATCH_*` environment variables
    pub fn from_env() -> Result<Self, ScratchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ScratchError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScratchError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScratchError> {
        let mut config = Self::default();

        if let Some(value) = lookup(TIMEOUT_ENV) {
            let secs: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ScratchError::InvalidConfig {
                    key: TIMEOUT_ENV.to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            config.command_timeout_ms = secs.saturating_mul(1000);
        }

        if let Some(value) = lookup(LINK_STRATEGY_ENV) {
            config.link_strategy = parse_setting(LINK_STRATEGY_ENV, &value)?;
        }

        if let Some(value) = lookup(DELETE_STRATEGY_ENV) {
            config.delete_strategy = parse_setting(DELETE_STRATEGY_ENV, &value)?;
        }

        if let Some(value) = lookup(SHELL_ENV) {
            config.shell = parse_setting(SHELL_ENV, &value)?;
        }

        Ok(config)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_link_strategy(mut self, strategy: Strategy) -> Self {
        self.link_strategy = strategy;
        self
    }

    pub fn with_delete_strategy(mut self, strategy: Strategy) -> Self {
        self.delete_strategy = strategy;
        self
    }

    pub fn with_shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }
}

fn parse_setting<T>(key: &str, value: &str) -> Result<T, ScratchError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .trim()
        .to_lowercase()
        .parse()
        .map_err(|reason| ScratchError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        })
}
