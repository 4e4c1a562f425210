//! # Muxsmith
//!
//! A tmux session manager that builds sessions, windows and panes from TOML
//! configuration.
//!
//! Each session is described by one config file. Starting it compiles the
//! description into a flat list of tmux commands and runs them in order,
//! stopping at the first one that fails.
//!
//! ## Quick Example
//!
//! ```toml
//! # ~/.config/muxsmith/proj.toml
//!
//! name = "proj"
//! root = "~/src/proj"
//! attach = true
//!
//! [[windows]]
//! name = "editor"
//! layout = "main-vertical"
//! panes = ["vim", "cargo watch -x test"]
//!
//! [[windows]]
//! name = "server"
//! panes = ["cargo run"]
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`config`]: Session and window descriptions
//! - [`loader`]: Config file storage
//! - [`path`]: `~/` expansion and escaping
//! - [`tmux`]: Tmux invocations and the [`tmux::Runner`] process seam
//! - [`discovery`]: Reading `base-index`/`pane-base-index` from the server
//! - [`compiler`]: Config to command chain
//! - [`chain`]: Running a command chain
//! - [`attach`]: Attaching to or switching to a session
//! - [`session`]: Start/stop orchestration
//! - [`editor`]: Opening configs in `$EDITOR`
//! - [`cli`]: Command-line argument parsing with clap
//! - [`error`]: Error types

pub mod attach;
pub mod chain;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod discovery;
pub mod editor;
pub mod error;
pub mod loader;
pub mod path;
pub mod session;
pub mod tmux;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::CommandChain;
pub use compiler::compile;
pub use config::{Config, Window};
pub use discovery::IndexBases;
pub use error::{MuxsmithError, Result};
