//! Shell dialects, command composition and the timed command runner

pub mod command;
pub mod error;
pub mod runner;

pub use command::CommandLine;
pub use error::CommandError;
pub use runner::{run_command, run_command_blocking, CommandOutput, DEFAULT_COMMAND_TIMEOUT};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Command interpreter used for composite scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shell {
    /// `cmd.exe /c`, double-quoted arguments
    Cmd,
    /// `sh -c`, POSIX single-quoted arguments
    Posix,
}

impl Shell {
    /// The interpreter native to the host
    pub fn host() -> Self {
        if cfg!(windows) {
            Shell::Cmd
        } else {
            Shell::Posix
        }
    }

    pub fn program(&self) -> &'static str {
        match self {
            Shell::Cmd => "cmd.exe",
            Shell::Posix => "sh",
        }
    }

    fn script_flag(&self) -> &'static str {
        match self {
            Shell::Cmd => "/c",
            Shell::Posix => "-c",
        }
    }

    /// Location of the interpreter on `PATH`, if it can be found
    pub fn program_path(&self) -> Option<PathBuf> {
        which::which(self.program()).ok()
    }

    /// Wrap a script into a single interpreter invocation
    pub fn script(&self, script: impl Into<String>) -> CommandLine {
        let line = CommandLine::new(self.program())
            .arg(self.script_flag())
            .arg(script);
        match self {
            Shell::Cmd => line.into_verbatim(),
            Shell::Posix => line,
        }
    }

    /// Quote one argument for this dialect.
    ///
    /// `cmd.exe` has no escape for `"` inside a quoted argument, so such
    /// arguments are rejected.
    pub fn quote(&self, argument: &str) -> Result<String, CommandError> {
        match self {
            Shell::Cmd => {
                if argument.contains('"') {
                    return Err(CommandError::Unquotable {
                        shell: self.to_string(),
                        argument: argument.to_string(),
                    });
                }
                Ok(format!("\"{argument}\""))
            }
            Shell::Posix => Ok(shell_words::quote(argument).into_owned()),
        }
    }

    /// Build one invocation that creates every `link -> target` pair, chained
    /// with `&&` so the batch stops at the first failure.
    ///
    /// Link and target are joined to `root` with `/`. Like `mklink /j`, the
    /// POSIX form refuses a link path that already exists instead of letting
    /// `ln` create the link inside an existing directory.
    pub fn junction_batch<I, K, V>(&self, root: &str, links: I) -> Result<CommandLine, CommandError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut commands = Vec::new();
        for (link, target) in links {
            let link = self.quote(&format!("{root}/{}", link.as_ref()))?;
            let target = self.quote(&format!("{root}/{}", target.as_ref()))?;
            commands.push(match self {
                Shell::Cmd => format!("mklink /j {link} {target}"),
                Shell::Posix => {
                    format!("[ ! -e {link} ] && [ ! -L {link} ] && ln -s {target} {link}")
                }
            });
        }

        if commands.is_empty() {
            return Err(CommandError::Empty);
        }
        Ok(self.script(commands.join(" && ")))
    }

    /// Build a recursive, forced, quiet removal of `path`
    pub fn recursive_delete(&self, path: &str) -> Result<CommandLine, CommandError> {
        let quoted = self.quote(path)?;
        Ok(match self {
            Shell::Cmd => self.script(format!("rd /s /q {quoted}")),
            Shell::Posix => self.script(format!("rm -rf {quoted}")),
        })
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::host()
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Cmd => f.write_str("cmd"),
            Shell::Posix => f.write_str("posix"),
        }
    }
}

impl std::str::FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cmd" => Ok(Shell::Cmd),
            "posix" | "sh" => Ok(Shell::Posix),
            _ => Err(format!("Invalid shell: {s}")),
        }
    }
}
