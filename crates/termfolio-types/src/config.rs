//! Terminal configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::theme::Theme;

/// Startup configuration for a terminal session.
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// usable configuration. Persisted user settings override the first five
/// fields once a session has stored them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Username shown in the prompt before the visitor picks one.
    pub username: String,
    /// Hostname shown in the prompt.
    pub hostname: String,
    /// Name of the home directory under `/home`.
    pub home_user: String,
    pub theme: Theme,
    /// Whether feedback sounds are enabled.
    pub sound: bool,
    /// Milliseconds per character for the typewriter effect.
    pub typing_speed_ms: u32,
    /// Maximum number of history entries kept.
    pub history_limit: usize,
    /// JSON file holding persisted key-values. `None` keeps them in memory.
    pub storage_path: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            username: "visitor".to_string(),
            hostname: "aayush-xid-su".to_string(),
            home_user: "aayush".to_string(),
            theme: Theme::Matrix,
            sound: true,
            typing_speed_ms: 20,
            history_limit: 500,
            storage_path: None,
        }
    }
}

impl TerminalConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded terminal config from {}", path.display());
        Ok(config)
    }

    /// Check the invariants the rest of the system relies on.
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(FolioError::Config(
                "history_limit must be positive".to_string(),
            ));
        }
        if self.home_user.is_empty() || self.home_user.contains('/') {
            return Err(FolioError::Config(format!(
                "home_user must be a single path segment, got '{}'",
                self.home_user
            )));
        }
        Ok(())
    }
}
