//! Starting and stopping sessions.
//!
//! [`build`] is the whole pipeline for a config that is not running yet:
//! discover the index bases, compile, run the chain. [`start`] adds the
//! surrounding decisions: reuse a running session, and attach at the end.

use crate::attach;
use crate::compiler;
use crate::config::Config;
use crate::discovery;
use crate::error::{MuxsmithError, Result};
use crate::loader::ConfigStore;
use crate::path;
use crate::tmux::{self, Invocation, Runner};
use std::path::PathBuf;

/// Run `invocation`, mapping any failure to [`MuxsmithError::TmuxError`].
fn run_checked<R: Runner>(runner: &mut R, invocation: &Invocation) -> Result<String> {
    let outcome = runner
        .run(invocation)
        .map_err(|e| MuxsmithError::TmuxError(format!("`{}`: {}", invocation, e)))?;
    if !outcome.success() {
        return Err(MuxsmithError::TmuxError(format!(
            "`{}` failed: {}",
            invocation,
            outcome.stderr.trim()
        )));
    }
    Ok(outcome.stdout)
}

pub fn start_server<R: Runner>(runner: &mut R) -> Result<()> {
    run_checked(runner, &tmux::start_server()).map(drop)
}

/// Whether tmux already has a session called `name`.
pub fn has_session<R: Runner>(runner: &mut R, name: &str) -> bool {
    runner
        .run(&tmux::has_session(name))
        .is_ok_and(|o| o.success())
}

/// Build the session described by `config` without attaching to it.
///
/// The session root must be an existing directory; tmux would otherwise
/// quietly start the windows somewhere else. Failures after that leave
/// behind whatever part of the session was already built.
pub fn build<R: Runner>(runner: &mut R, config: &Config, home: &str, debug: bool) -> Result<()> {
    let root = PathBuf::from(path::resolve(&config.root, home));
    if !root.is_dir() {
        return Err(MuxsmithError::RootNotFound(root));
    }

    let bases = discovery::discover(runner)?;
    let mut chain = compiler::compile(config, bases, home)?;
    chain.debug = debug;
    tracing::debug!(session = %config.name, steps = chain.len(), "running command chain");
    chain.run(runner)?;
    Ok(())
}

/// What [`start`] decided to do once the session exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Started {
    /// The session was already running.
    AlreadyRunning(String),
    /// The session was built and the config asks to attach.
    Built { name: String, attach: bool },
}

/// Start the session stored as `name`.
///
/// A running session of that name is reused as-is. Otherwise the stored
/// config is loaded and built.
pub fn prepare<R: Runner>(
    runner: &mut R,
    store: &ConfigStore,
    name: &str,
    home: &str,
    debug: bool,
) -> Result<Started> {
    start_server(runner)?;

    if has_session(runner, name) {
        tracing::debug!(session = name, "session already running");
        return Ok(Started::AlreadyRunning(name.to_string()));
    }

    let config = store.load(name)?;
    build(runner, &config, home, debug)?;
    Ok(Started::Built {
        name: config.name,
        attach: config.attach,
    })
}

/// [`prepare`] against the real tmux, then attach when required.
///
/// Attaching replaces the process, so on that path this only returns on
/// error.
pub fn start(store: &ConfigStore, name: &str, home: &str, debug: bool) -> Result<()> {
    let mut runner = tmux::SystemRunner;
    match prepare(&mut runner, store, name, home, debug)? {
        Started::AlreadyRunning(session) | Started::Built { name: session, attach: true } => {
            Err(attach::attach(&session).into())
        }
        Started::Built { attach: false, .. } => Ok(()),
    }
}

/// Kill session `name`, or the current client's session when `None`.
pub fn stop<R: Runner>(runner: &mut R, name: Option<&str>) -> Result<()> {
    let name = match name {
        Some(n) => n.to_string(),
        None => {
            let current = run_checked(runner, &tmux::display_message("#S")).map_err(|_| {
                MuxsmithError::TmuxError("could not determine current tmux session".into())
            })?;
            current.trim().to_string()
        }
    };
    run_checked(runner, &tmux::kill_session(&name)).map(drop)
}
