//! Test doubles for the [`Runner`] seam.

use crate::tmux::{Invocation, Outcome, Runner};
use std::collections::VecDeque;
use std::io;

/// A scripted reply for the next invocation.
pub enum Reply {
    Exit { status: i32, stdout: String, stderr: String },
    SpawnError(io::ErrorKind),
}

impl Reply {
    pub fn ok() -> Self {
        Self::stdout("")
    }

    pub fn stdout(out: &str) -> Self {
        Reply::Exit {
            status: 0,
            stdout: out.to_string(),
            stderr: String::new(),
        }
    }

    pub fn fail(status: i32, stderr: &str) -> Self {
        Reply::Exit {
            status,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Records every invocation and answers from a script.
///
/// Once the script runs out every invocation succeeds with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: VecDeque<Reply>,
    pub calls: Vec<Invocation>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: Vec::new(),
        }
    }

    /// Subcommand names (first tmux argument) of recorded calls.
    pub fn subcommands(&self) -> Vec<&str> {
        self.calls
            .iter()
            .map(|c| c.args.first().map(String::as_str).unwrap_or(""))
            .collect()
    }
}

impl Runner for ScriptedRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<Outcome> {
        self.calls.push(invocation.clone());
        match self.replies.pop_front().unwrap_or_else(Reply::ok) {
            Reply::Exit {
                status,
                stdout,
                stderr,
            } => Ok(Outcome {
                status: Some(status),
                stdout,
                stderr,
            }),
            Reply::SpawnError(kind) => Err(io::Error::from(kind)),
        }
    }
}
