//! Git error type
//!
//! Most failures in a scan are recorded as data on the result records, so
//! this type is mostly formatted into messages rather than propagated.

use std::fmt;

#[derive(Debug)]
pub enum GitError {
    /// git could not be started, or was killed by the command timeout
    Spawn {
        command: String,
        source: std::io::Error,
    },
    /// git ran and exited with a non-zero status
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    /// git output did not have the expected shape
    ParseError(String),
}

impl GitError {
    /// First non-empty line of git's stderr, which carries the `fatal:` reason.
    fn stderr_summary(stderr: &str) -> Option<&str> {
        stderr.lines().map(str::trim).find(|line| !line.is_empty())
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::Spawn { command, source } => {
                write!(f, "failed to run `{command}`: {source}")
            }
            GitError::CommandFailed {
                command,
                code,
                stderr,
            } => match Self::stderr_summary(stderr) {
                Some(line) => write!(f, "{line}"),
                None => match code {
                    Some(code) => write!(f, "`{command}` exited with status {code}"),
                    None => write!(f, "`{command}` was terminated by a signal"),
                },
            },
            GitError::ParseError(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}
