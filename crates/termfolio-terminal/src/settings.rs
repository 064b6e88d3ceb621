//! User-adjustable terminal settings and their persisted keys.

use serde::{Deserialize, Serialize};
use termfolio_platform::{KeyValueStore, load_json, save_json};
use termfolio_types::config::TerminalConfig;
use termfolio_types::error::Result;
use termfolio_types::theme::Theme;

/// Keys under which session data is persisted.
pub mod keys {
    pub const USERNAME: &str = "terminal-username";
    pub const HOSTNAME: &str = "terminal-hostname";
    pub const THEME: &str = "terminal-theme";
    pub const SOUND: &str = "terminal-sound";
    pub const SPEED: &str = "terminal-speed";
    pub const HISTORY: &str = "terminal-history";
    pub const SHUTDOWN: &str = "terminal-shutdown";
    pub const RPS_SCORE: &str = "rps-score";
}

/// Settings a visitor can change with `set` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub username: String,
    pub hostname: String,
    pub theme: Theme,
    pub sound: bool,
    /// Milliseconds per character for the typewriter effect.
    pub typing_speed_ms: u32,
}

impl Settings {
    /// The configured defaults, ignoring anything persisted.
    pub fn from_config(config: &TerminalConfig) -> Self {
        Self {
            username: config.username.clone(),
            hostname: config.hostname.clone(),
            theme: config.theme,
            sound: config.sound,
            typing_speed_ms: config.typing_speed_ms,
        }
    }

    /// Persisted values where present and well-formed, config defaults
    /// otherwise.
    pub fn load(store: &dyn KeyValueStore, config: &TerminalConfig) -> Self {
        let defaults = Self::from_config(config);
        Self {
            username: load_json(store, keys::USERNAME).unwrap_or(defaults.username),
            hostname: load_json(store, keys::HOSTNAME).unwrap_or(defaults.hostname),
            theme: load_json(store, keys::THEME).unwrap_or(defaults.theme),
            sound: load_json(store, keys::SOUND).unwrap_or(defaults.sound),
            typing_speed_ms: load_json(store, keys::SPEED).unwrap_or(defaults.typing_speed_ms),
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_json(store, keys::USERNAME, &self.username)?;
        save_json(store, keys::HOSTNAME, &self.hostname)?;
        save_json(store, keys::THEME, &self.theme)?;
        save_json(store, keys::SOUND, &self.sound)?;
        save_json(store, keys::SPEED, &self.typing_speed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_platform::MemoryStore;

    #[test]
    fn empty_store_gives_config_defaults() {
        let store = MemoryStore::new();
        let config = TerminalConfig::default();
        assert_eq!(Settings::load(&store, &config), Settings::from_config(&config));
    }

    #[test]
    fn persisted_values_override_defaults() {
        let mut store = MemoryStore::new();
        store.set(keys::USERNAME, "\"neo\"".into()).unwrap();
        store.set(keys::THEME, "\"cosmic\"".into()).unwrap();
        let s = Settings::load(&store, &TerminalConfig::default());
        assert_eq!(s.username, "neo");
        assert_eq!(s.theme, Theme::Cosmic);
        assert_eq!(s.hostname, "aayush-xid-su");
    }

    #[test]
    fn malformed_value_falls_back() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME, "\"hacker\"".into()).unwrap();
        store.set(keys::SPEED, "-5".into()).unwrap();
        let s = Settings::load(&store, &TerminalConfig::default());
        assert_eq!(s.theme, Theme::Matrix);
        assert_eq!(s.typing_speed_ms, 20);
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let config = TerminalConfig::default();
        let mut s = Settings::from_config(&config);
        s.sound = false;
        s.typing_speed_ms = 0;
        s.save(&mut store).unwrap();
        assert_eq!(store.get(keys::SOUND).as_deref(), Some("false"));
        assert_eq!(Settings::load(&store, &config), s);
    }
}
