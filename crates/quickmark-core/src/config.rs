//! Configuration types.
//!
//! Configuration lives in `config.toml` under the platform config directory.
//! Every key is optional; a missing file yields the defaults below.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ConfigError;

/// Maximum number of results the provider returns.
pub const DEFAULT_MAX_RESULTS: usize = 40;

/// Quiet period before a typed query is sent to the provider.
pub const DEFAULT_DEBOUNCE_MS: u64 = 80;

/// Upper bound on a single host round trip.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Command name that toggles the palette.
pub const TOGGLE_COMMAND: &str = "toggle-palette";

/// Runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickmarkConfig {
    /// Hotkey configuration
    #[serde(default)]
    pub hotkey: HotkeyConfig,

    /// Search tuning
    #[serde(default)]
    pub search: SearchConfig,

    /// Overlay behaviour
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Overlay key bindings: keystroke to action name, or `"none"` to
    /// remove a default binding.
    #[serde(default)]
    pub keymap: BTreeMap<String, String>,

    /// Bookmark tree JSON file used by the bundled host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<PathBuf>,
}

/// Hotkey configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Toggle hotkey string, e.g., "ctrl+shift+k"
    pub toggle: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            toggle: "ctrl+shift+k".to_string(),
        }
    }
}

/// Search tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub max_results: usize,
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_results: DEFAULT_MAX_RESULTS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Overlay behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// What to do when the host refuses an open request.
    pub open_failure: OpenFailurePolicy,
}

/// Reaction to a negative open acknowledgement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenFailurePolicy {
    /// Leave the overlay up so the user can pick again.
    #[default]
    KeepOpen,
    /// Hide regardless of the acknowledgement.
    Hide,
}

impl QuickmarkConfig {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse and validate TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid {
                key: "search.max_results",
                message: "must be at least 1".to_string(),
            });
        }
        if self.search.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "search.timeout_ms",
                message: "must be at least 1".to_string(),
            });
        }
        if self.hotkey.toggle.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "hotkey.toggle",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quickmark"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = QuickmarkConfig::default();
        assert_eq!(config.search.max_results, 40);
        assert_eq!(config.search.debounce(), Duration::from_millis(80));
        assert_eq!(config.behavior.open_failure, OpenFailurePolicy::KeepOpen);
        assert!(config.bookmarks.is_none());
        assert!(config.keymap.is_empty());
    }

    #[test]
    fn test_keymap_table() {
        let config = QuickmarkConfig::parse(
            r#"
            [keymap]
            "ctrl+j" = "cursor_down"
            "cmd+enter" = "none"
            "#,
        )
        .unwrap();

        assert_eq!(config.keymap.len(), 2);
        assert_eq!(config.keymap["ctrl+j"], "cursor_down");
        assert_eq!(config.keymap["cmd+enter"], "none");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = QuickmarkConfig::parse(
            r#"
            [search]
            debounce_ms = 120

            [behavior]
            open_failure = "hide"
            "#,
        )
        .unwrap();

        assert_eq!(config.search.debounce_ms, 120);
        assert_eq!(config.search.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.behavior.open_failure, OpenFailurePolicy::Hide);
        assert_eq!(config.hotkey, HotkeyConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let err = QuickmarkConfig::parse("[search]\nmax_results = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "search.max_results",
                ..
            }
        ));

        let err = QuickmarkConfig::parse("[search]\ndebounce_ms = \"soon\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bookmarks = \"/tmp/bookmarks.json\"").unwrap();
        writeln!(file, "[hotkey]\ntoggle = \"cmd+k\"").unwrap();

        let config = QuickmarkConfig::load_from(file.path()).unwrap();
        assert_eq!(config.hotkey.toggle, "cmd+k");
        assert_eq!(
            config.bookmarks.as_deref(),
            Some(Path::new("/tmp/bookmarks.json"))
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuickmarkConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
