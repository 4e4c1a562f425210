//! Opening config files in the user's `$EDITOR`.

use crate::error::{MuxsmithError, Result};
use crate::tmux::Invocation;
use std::os::unix::process::CommandExt;
use std::path::Path;

/// Build the editor command line for `path`.
///
/// `editor` may carry its own arguments, e.g. `code --wait`.
///
/// # Errors
///
/// [`MuxsmithError::NoEditor`] if `editor` is unset or blank.
pub fn editor_invocation(editor: Option<&str>, path: &Path) -> Result<Invocation> {
    let mut words = editor.unwrap_or_default().split_whitespace();
    let program = words.next().ok_or(MuxsmithError::NoEditor)?;
    let mut args: Vec<String> = words.map(str::to_string).collect();
    args.push(path.to_string_lossy().into_owned());
    Ok(Invocation::new(program, args))
}

/// Replace the current process with `$EDITOR path`.
///
/// Only returns if the editor could not be started.
pub fn edit(path: &Path) -> MuxsmithError {
    let editor = std::env::var("EDITOR").ok();
    let invocation = match editor_invocation(editor.as_deref(), path) {
        Ok(invocation) => invocation,
        Err(err) => return err,
    };
    tracing::debug!(command = %invocation, "opening editor");
    MuxsmithError::IoError(invocation.command().exec())
}
