//! The tmux control surface.
//!
//! Every interaction with tmux is an [`Invocation`]: a program name plus an
//! argument vector, run as its own process. The builders in this module are
//! the only place tmux command lines are spelled out; everything else composes
//! them. Invocations are executed through the [`Runner`] trait so the compiler,
//! discovery and executor can be exercised against a recording fake instead of
//! a live tmux server.
//!
//! # Targets
//!
//! Windows are addressed as `session:index` and panes as `session:index.pane`.
//! Both indices are offset by the server's `base-index` and `pane-base-index`
//! options, see [`crate::discovery`].

use std::fmt;
use std::process::Command;

/// Name of the tmux executable.
pub const TMUX: &str = "tmux";

/// Environment variable tmux sets inside its clients.
pub const TMUX_ENV: &str = "TMUX";

/// Layout applied to windows that do not name one.
pub const DEFAULT_LAYOUT: &str = "tiled";

/// Check if we're running inside a tmux session.
pub fn in_tmux() -> bool {
    std::env::var_os(TMUX_ENV).is_some_and(|v| !v.is_empty())
}

/// A single external command: executable name and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// An invocation of the tmux executable.
    pub fn tmux<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TMUX, args)
    }

    /// Build a [`Command`] ready to spawn.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// What a finished invocation reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Exit code, `None` when terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs invocations to completion, one at a time.
///
/// Implementations must block until the process has exited. An `Err` means
/// the process could not be started; a non-zero exit is reported through
/// [`Outcome::status`].
pub trait Runner {
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<Outcome>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<Outcome> {
        let output = invocation.command().output()?;
        Ok(Outcome {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl<R: Runner + ?Sized> Runner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> std::io::Result<Outcome> {
        (**self).run(invocation)
    }
}

/// `session:index`
pub fn window_target(session: &str, index: impl fmt::Display) -> String {
    format!("{}:{}", session, index)
}

/// `session:index.pane`
pub fn pane_target(window: &str, index: u32) -> String {
    format!("{}.{}", window, index)
}

pub fn start_server() -> Invocation {
    Invocation::tmux(["start-server"])
}

/// `=name`, a target that only matches a session with exactly this name.
///
/// A bare `-t name` also matches any session whose name starts with `name`.
pub fn exact_session(name: &str) -> String {
    format!("={}", name)
}

pub fn has_session(name: &str) -> Invocation {
    Invocation::tmux(["has-session", "-t", exact_session(name).as_str()])
}

/// Create a detached session whose first window is named `window` and starts in `root`.
pub fn new_session(name: &str, window: &str, root: &str) -> Invocation {
    Invocation::tmux(["new-session", "-d", "-s", name, "-n", window, "-c", root])
}

/// Create a bare detached session.
pub fn new_detached_session(name: &str) -> Invocation {
    Invocation::tmux(["new-session", "-d", "-s", name])
}

pub fn new_window(target: &str, name: &str, root: &str) -> Invocation {
    Invocation::tmux(["new-window", "-t", target, "-n", name, "-c", root])
}

pub fn split_window(target: &str, root: &str) -> Invocation {
    Invocation::tmux(["split-window", "-t", target, "-c", root])
}

/// Type `keys` into a pane and press Enter.
pub fn send_keys(target: &str, keys: &str) -> Invocation {
    Invocation::tmux(["send-keys", "-t", target, keys, "Enter"])
}

pub fn select_layout(target: &str, layout: &str) -> Invocation {
    Invocation::tmux(["select-layout", "-t", target, layout])
}

pub fn select_window(target: &str) -> Invocation {
    Invocation::tmux(["select-window", "-t", target])
}

pub fn select_pane(target: &str) -> Invocation {
    Invocation::tmux(["select-pane", "-t", target])
}

pub fn kill_session(name: &str) -> Invocation {
    Invocation::tmux(["kill-session", "-t", exact_session(name).as_str()])
}

/// Query a global session option, e.g. `base-index`.
pub fn show_global_option(option: &str) -> Invocation {
    Invocation::tmux(["show-options", "-g", option])
}

/// Query a global window option, e.g. `pane-base-index`.
pub fn show_global_window_option(option: &str) -> Invocation {
    Invocation::tmux(["show-window-options", "-g", option])
}

/// Print a format string in the context of the current client.
pub fn display_message(format: &str) -> Invocation {
    Invocation::tmux(["display-message", "-p", format])
}

pub fn attach_session(name: &str) -> Invocation {
    Invocation::tmux(["-u", "attach-session", "-t", name])
}

pub fn switch_client(name: &str) -> Invocation {
    Invocation::tmux(["-u", "switch-client", "-t", name])
}
