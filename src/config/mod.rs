// ABOUTME: Runtime configuration for the log pane, loadable from a TOML file

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds a notification stays visible before auto-hiding.
    pub notification_hide_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notification_hide_secs: 5,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from the user config directory, falling back to defaults when
    /// no file exists there.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logpane").join("config.toml"))
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_secs(self.notification_hide_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    #[test]
    fn defaults_to_five_seconds() {
        let config = Config::default();
        assert_eq!(config.notification_hide_secs, 5);
        assert_eq!(config.hide_delay(), Duration::from_secs(5));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").expect("parse empty config");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parses_hide_interval() {
        let config: Config = toml::from_str("notification_hide_secs = 2").expect("parse config");
        assert_eq!(config.hide_delay(), Duration::from_secs(2));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = Config::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_reports_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, "notification_hide_secs = \"soon\"").expect("write config");

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
