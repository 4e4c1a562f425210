//! Session configuration types.
//!
//! One TOML file describes one tmux session: its name, root directory and an
//! ordered list of windows, each with an ordered list of pane commands.
//!
//! # Config Format
//!
//! ```toml
//! name = "proj"
//! root = "~/src/proj"
//! attach = true
//! pre_window = "nvm use"
//! startup_window = "editor"
//! startup_pane = 0
//!
//! [[windows]]
//! name = "editor"
//! layout = "main-vertical"
//! panes = ["vim", "guard"]
//!
//! [[windows]]
//! name = "server"
//! root = "~/src/proj/api"
//! panes = ["cargo run"]
//! ```

use crate::error::{MuxsmithError, Result};
use serde::{Deserialize, Serialize};

/// A tmux window and the commands typed into each of its panes.
///
/// An empty pane command leaves that pane at a plain shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Window name shown in the status line.
    pub name: String,
    /// Working directory, defaults to the session root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// tmux layout name, defaults to `tiled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// One entry per pane, in pane order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub panes: Vec<String>,
}

impl Window {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_panes<I, S>(mut self, panes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.panes = panes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }
}

/// Top-level description of one tmux session.
///
/// `windows` is kept last so it serializes after the plain keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// tmux session name.
    pub name: String,
    /// Default working directory for every window.
    pub root: String,
    /// Attach to the session once it is built.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub attach: bool,
    /// Command typed into every pane before its own command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_window: Option<String>,
    /// Window to focus at the end, by name or index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_window: Option<String>,
    /// Pane to focus in the startup window (0-based).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub startup_pane: u32,
    /// Windows in creation order. The first one is created with the session.
    pub windows: Vec<Window>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Config {
    /// Starter config written by `muxsmith new`.
    pub fn template(name: &str) -> Self {
        Self {
            name: name.to_string(),
            root: "~/".to_string(),
            windows: vec![
                Window::new("editor")
                    .with_layout("main-vertical")
                    .with_panes(["vim", "guard"]),
                Window::new("server").with_panes(["bundle exec rails s"]),
                Window::new("logs").with_panes(["tail -f log/development.log"]),
            ],
            ..Default::default()
        }
    }

    /// Parse and validate a config from a TOML string.
    ///
    /// # Errors
    ///
    /// - [`MuxsmithError::ParseError`] if the TOML is malformed or lacks
    ///   `name`, `root` or `windows`
    /// - [`MuxsmithError::InvalidConfig`] if any of those is empty
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that name, root and windows are all present.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.name.trim().is_empty() {
            "missing name"
        } else if self.root.trim().is_empty() {
            "missing root"
        } else if self.windows.is_empty() {
            "missing windows"
        } else {
            return Ok(());
        };
        Err(MuxsmithError::InvalidConfig {
            name: self.name.clone(),
            reason: reason.to_string(),
        })
    }
}
