//! Application configuration.
//!
//! Settings come from `<config dir>/folio/config.toml` when present; command-line
//! flags override individual fields afterwards.

use crate::error::{FolioError, Result};
use crate::search::worker::DEFAULT_CACHE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Portfolio document; the built-in sample is used when unset
    pub content_path: Option<PathBuf>,
    /// Where preferences are persisted; the platform default is used when unset
    pub preferences_path: Option<PathBuf>,
    /// Terminal input poll interval in milliseconds
    pub input_poll_ms: u64,
    /// Animation tick interval in milliseconds
    pub tick_ms: u64,
    /// Distinct queries remembered by the search worker
    pub worker_cache_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_path: None,
            preferences_path: None,
            input_poll_ms: 50,
            tick_ms: 30,
            worker_cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl AppConfig {
    /// `<config dir>/folio/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is an error
    /// because the user asked for it explicitly.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(err) => {
                return Err(FolioError::file_error(
                    format!("Failed to read config {}", path.display()),
                    err,
                ))
            }
        };

        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| FolioError::config(format!("{}: {}", path.display(), e.message())))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.input_poll_ms == 0 {
            return Err(FolioError::config("input_poll_ms must be positive"));
        }
        if self.tick_ms == 0 {
            return Err(FolioError::config("tick_ms must be positive"));
        }
        Ok(())
    }

    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Preferences file to use, if any location is known
    pub fn resolved_preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path
            .clone()
            .or_else(crate::prefs::default_preferences_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "content_path = \"/srv/me.toml\"\ntick_ms = 16\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.content_path, Some(PathBuf::from("/srv/me.toml")));
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
        assert_eq!(config.input_poll_ms, 50);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "tick_ms = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(FolioError::ConfigError { .. })
        ));

        std::fs::write(&path, "tick_ms = \"fast\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(FolioError::ConfigError { .. })
        ));
    }
}
