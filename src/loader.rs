//! Config store: one TOML file per session under a per-user directory.
//!
//! The directory is found in this order:
//!
//! 1. `$XDG_CONFIG_HOME/muxsmith/`
//! 2. `~/.config/muxsmith/`
//!
//! and each session lives in `<dir>/<name>.toml`.

use crate::config::Config;
use crate::error::{MuxsmithError, Result};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "toml";

/// Determine the config directory.
///
/// # Errors
///
/// Returns [`MuxsmithError::NoConfigDir`] if the home directory cannot be determined.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("muxsmith"));
    }
    dirs::home_dir()
        .map(|home| home.join(".config").join("muxsmith"))
        .ok_or(MuxsmithError::NoConfigDir)
}

/// Stored session configs.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store at [`default_config_dir`], creating it if necessary.
    pub fn open_default() -> Result<Self> {
        let store = Self::new(default_config_dir()?);
        store.ensure_dir()?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the store directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// [`MuxsmithError::NotADirectory`] if the path exists as something else.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(MuxsmithError::NotADirectory(self.dir.clone()));
        }
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Path of the file holding config `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Load and validate config `name`.
    ///
    /// # Errors
    ///
    /// - [`MuxsmithError::ConfigNotFound`] if there is no such file
    /// - [`MuxsmithError::ParseError`] or [`MuxsmithError::InvalidConfig`] if
    ///   the file is not a usable session config
    pub fn load(&self, name: &str) -> Result<Config> {
        if !self.exists(name) {
            return Err(MuxsmithError::ConfigNotFound(name.to_string()));
        }
        let contents = std::fs::read_to_string(self.path(name))?;
        Config::from_toml(&contents)
    }

    /// Write `config` under its own name, replacing any existing file.
    pub fn write(&self, config: &Config) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.path(&config.name);
        std::fs::write(&path, config.to_toml()?)?;
        tracing::debug!(path = %path.display(), "wrote config");
        Ok(path)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(MuxsmithError::ConfigNotFound(name.to_string()));
        }
        std::fs::remove_file(self.path(name))?;
        Ok(())
    }

    /// Names of all stored configs, sorted alphabetically.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|e| e != EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
