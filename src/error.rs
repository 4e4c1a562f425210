//! Error types for muxsmith.
//!
//! Each stage of a session run has its own error type so the failing stage
//! can be named precisely. [`MuxsmithError`] wraps all of them together with
//! the configuration store errors and is what the CLI reports.

use crate::tmux::Invocation;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The step of index-base discovery that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStage {
    /// Creating the disposable session.
    Create,
    /// Running the `base-index` option query.
    QueryWindowBase,
    /// Reading a number out of the `base-index` query output.
    ParseWindowBase,
    /// Running the `pane-base-index` option query.
    QueryPaneBase,
    /// Reading a number out of the `pane-base-index` query output.
    ParsePaneBase,
    /// Killing the disposable session.
    Teardown,
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            DiscoveryStage::Create => "create",
            DiscoveryStage::QueryWindowBase => "query-window-base",
            DiscoveryStage::ParseWindowBase => "parse-window-base",
            DiscoveryStage::QueryPaneBase => "query-pane-base",
            DiscoveryStage::ParsePaneBase => "parse-pane-base",
            DiscoveryStage::Teardown => "teardown",
        };
        f.write_str(stage)
    }
}

/// Index-base discovery failed.
#[derive(Error, Debug)]
#[error("index discovery failed at {stage}: {detail}")]
pub struct DiscoveryError {
    pub stage: DiscoveryStage,
    pub detail: String,
}

impl DiscoveryError {
    pub fn new(stage: DiscoveryStage, detail: impl Into<String>) -> Self {
        Self {
            stage,
            detail: detail.into(),
        }
    }
}

/// The session descriptor cannot be compiled.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompileError {
    #[error("session '{0}' has no windows")]
    NoWindows(String),

    #[error("session '{0}' has a window or pane index too large to address")]
    IndexOverflow(String),
}

/// An invocation in the command chain failed; the rest of the chain was skipped.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The invocation ran and exited non-zero (or was killed by a signal).
    #[error("`{invocation}` failed ({}): {}", describe_status(.status), .stderr.trim())]
    Failed {
        invocation: Invocation,
        status: Option<i32>,
        stderr: String,
    },

    /// The invocation could not be started at all.
    #[error("could not run `{invocation}`: {source}")]
    Spawn {
        invocation: Invocation,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    /// The invocation that stopped the chain.
    pub fn invocation(&self) -> &Invocation {
        match self {
            ExecError::Failed { invocation, .. } | ExecError::Spawn { invocation, .. } => {
                invocation
            }
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Handing the process over to `tmux attach-session`/`switch-client` failed.
#[derive(Error, Debug)]
pub enum AttachError {
    #[error("tmux executable not found")]
    NotFound,

    #[error("could not attach to session '{session}': {source}")]
    Exec {
        session: String,
        #[source]
        source: std::io::Error,
    },
}

/// All possible errors that can occur in muxsmith.
#[derive(Error, Debug)]
pub enum MuxsmithError {
    /// No stored config under this name.
    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    /// `new` was asked to create a config that already exists.
    #[error("Config already exists: {0}")]
    ConfigExists(String),

    /// The stored config is missing required content.
    #[error("Invalid config {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    /// Could not determine the user's config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// The config directory path exists but is not a directory.
    #[error("Config path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The session root does not exist or is not a directory.
    #[error("Session root is not a directory: {0}")]
    RootNotFound(PathBuf),

    /// `$EDITOR` is not set.
    #[error("EDITOR variable not defined in env")]
    NoEditor,

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// TOML serialization failed.
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A direct tmux call made outside the command chain failed.
    #[error("Tmux error: {0}")]
    TmuxError(String),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Attach(#[from] AttachError),
}

/// Convenient Result type alias for muxsmith operations.
pub type Result<T> = std::result::Result<T, MuxsmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_error_names_stage() {
        let err = DiscoveryError::new(DiscoveryStage::ParsePaneBase, "no digits in ''");
        assert_eq!(
            err.to_string(),
            "index discovery failed at parse-pane-base: no digits in ''"
        );
    }

    #[test]
    fn test_exec_error_names_invocation() {
        let err = ExecError::Failed {
            invocation: Invocation::tmux(["select-window", "-t", "proj:9"]),
            status: Some(1),
            stderr: "can't find window: 9\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "`tmux select-window -t proj:9` failed (exit status 1): can't find window: 9"
        );
        assert_eq!(err.invocation().args[0], "select-window");
    }
}
