//! Command line representation

use std::fmt;
use tokio::process::Command;

use super::error::CommandError;

/// A program plus its argument tokens, ready to be spawned once.
///
/// A verbatim command line is rendered exactly as stored: on Windows its
/// arguments are handed to the child untouched, so `cmd.exe` sees the
/// composite line the way it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    verbatim: bool,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            verbatim: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Split a single command string into tokens.
    ///
    /// On Windows the line is split on whitespace only, so backslashes in
    /// paths survive untouched. Elsewhere splitting follows POSIX word rules
    /// and respects quotes. Build `cmd.exe` scripts with
    /// [`super::Shell::script`] instead.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        if cfg!(windows) {
            Self::split_whitespace(line)
        } else {
            Self::split_posix(line)
        }
    }

    /// Split on POSIX shell word rules; a backslash outside quotes escapes
    pub fn split_posix(line: &str) -> Result<Self, CommandError> {
        let tokens = shell_words::split(line).map_err(|source| CommandError::Parse {
            command: line.to_string(),
            source,
        })?;
        Self::from_split(tokens)
    }

    /// Split on runs of whitespace with no quoting or escaping
    pub fn split_whitespace(line: &str) -> Result<Self, CommandError> {
        Self::from_split(line.split_whitespace().map(str::to_string).collect())
    }

    fn from_split(tokens: Vec<String>) -> Result<Self, CommandError> {
        let mut tokens = tokens.into_iter();
        let program = tokens.next().ok_or(CommandError::Empty)?;
        Ok(Self {
            program,
            args: tokens.collect(),
            verbatim: false,
        })
    }

    /// Join tokens with a single space, then split the result like [`Self::parse`]
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tokens
            .into_iter()
            .map(|token| token.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self::parse(&joined)
    }

    pub(crate) fn into_verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn is_verbatim(&self) -> bool {
        self.verbatim
    }

    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        #[cfg(windows)]
        {
            if self.verbatim {
                for arg in &self.args {
                    cmd.raw_arg(arg);
                }
                return cmd;
            }
        }

        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.verbatim {
            f.write_str(&self.program)?;
            for arg in &self.args {
                write!(f, " {arg}")?;
            }
            Ok(())
        } else {
            f.write_str(&shell_words::join(
                std::iter::once(&self.program).chain(&self.args),
            ))
        }
    }
}
