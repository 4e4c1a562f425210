//! Handing the terminal over to tmux.
//!
//! Attaching replaces the muxsmith process with a tmux client. From outside
//! tmux that client runs `attach-session`; from inside an existing client it
//! runs `switch-client`, which moves the current client to the session
//! instead of nesting one tmux inside another.

use crate::error::AttachError;
use crate::tmux::{self, Invocation};
use std::io::ErrorKind;
use std::os::unix::process::CommandExt;

/// The tmux invocation that puts the user in front of `session`.
pub fn attach_invocation(session: &str, inside_tmux: bool) -> Invocation {
    if inside_tmux {
        tmux::switch_client(session)
    } else {
        tmux::attach_session(session)
    }
}

/// Replace the current process with a tmux client showing `session`.
///
/// Never returns on success. The returned value is the reason the exec
/// failed.
pub fn attach(session: &str) -> AttachError {
    let invocation = attach_invocation(session, tmux::in_tmux());
    tracing::debug!(command = %invocation, "replacing process");

    let err = invocation.command().exec();
    if err.kind() == ErrorKind::NotFound {
        AttachError::NotFound
    } else {
        AttachError::Exec {
            session: session.to_string(),
            source: err,
        }
    }
}
