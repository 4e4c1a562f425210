//! Session layout compiler.
//!
//! Turns a [`Config`] into the [`CommandChain`] that builds it. Compilation
//! is pure: the index bases come in as a value and nothing touches tmux.
//!
//! tmux creates window 0 together with the session and pane 0 together with
//! each window, so those are never created explicitly. Every later window
//! gets a `new-window` and every later pane a `split-window`.

use crate::chain::CommandChain;
use crate::config::Config;
use crate::discovery::IndexBases;
use crate::error::CompileError;
use crate::path;
use crate::tmux::{self, DEFAULT_LAYOUT};

/// Compile `config` into the invocations that build its session.
///
/// `home` replaces a leading `~/` in every root. The returned chain has its
/// debug flag cleared; set it on the result to log each step.
///
/// # Errors
///
/// - [`CompileError::NoWindows`] if the config has no windows
/// - [`CompileError::IndexOverflow`] if a window or pane index does not fit
///   in a `u32` once offset by its base
pub fn compile(
    config: &Config,
    bases: IndexBases,
    home: &str,
) -> Result<CommandChain, CompileError> {
    let first = config
        .windows
        .first()
        .ok_or_else(|| CompileError::NoWindows(config.name.clone()))?;

    let root = path::resolve(&config.root, home);
    let window_root = |override_root: &Option<String>| match override_root {
        Some(r) => path::resolve(r, home),
        None => root.clone(),
    };

    let mut chain = CommandChain::new(false);
    chain.push(tmux::new_session(
        &config.name,
        &first.name,
        &window_root(&first.root),
    ));

    for (i, window) in config.windows.iter().enumerate() {
        let window_id = tmux::window_target(&config.name, offset(config, i, bases.window)?);
        let escaped_root = path::escape(&window_root(&window.root));

        if i != 0 {
            chain.push(tmux::new_window(&window_id, &window.name, &escaped_root));
        }

        for (j, pane) in window.panes.iter().enumerate() {
            let pane_id = tmux::pane_target(&window_id, offset(config, j, bases.pane)?);

            if j != 0 {
                chain.push(tmux::split_window(&window_id, &escaped_root));
            }
            if let Some(pre) = config.pre_window.as_deref().filter(|p| !p.is_empty()) {
                chain.push(tmux::send_keys(&pane_id, pre));
            }
            if !pane.is_empty() {
                chain.push(tmux::send_keys(&pane_id, pane));
            }
        }

        let layout = window.layout.as_deref().unwrap_or(DEFAULT_LAYOUT);
        chain.push(tmux::select_layout(&window_id, layout));
    }

    let startup = match config.startup_window.as_deref() {
        Some(w) if !w.is_empty() => tmux::window_target(&config.name, w),
        _ => tmux::window_target(&config.name, bases.window),
    };
    chain.push(tmux::select_window(&startup));
    let startup_pane = config
        .startup_pane
        .checked_add(bases.pane)
        .ok_or_else(|| CompileError::IndexOverflow(config.name.clone()))?;
    chain.push(tmux::select_pane(&tmux::pane_target(&startup, startup_pane)));

    Ok(chain)
}

/// `position + base`, failing instead of wrapping.
fn offset(config: &Config, position: usize, base: u32) -> Result<u32, CompileError> {
    u32::try_from(position)
        .ok()
        .and_then(|p| p.checked_add(base))
        .ok_or_else(|| CompileError::IndexOverflow(config.name.clone()))
}
