//! Configuration file support.

use crate::store::RemoteConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config file.
///
/// Everything here can also be supplied directly to the store
/// constructors; the config file is a convenience, not a requirement.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory holding the local record database
    pub data_dir: Option<PathBuf>,

    /// Hosted record database connection settings
    pub remote: Option<RemoteConfig>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/satchel/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("satchel")
            .join("config.toml")
    }

    /// Resolve the data directory, with an explicit override taking
    /// precedence.
    ///
    /// Precedence order:
    /// 1. Explicit override
    /// 2. Config file `data_dir` setting
    /// 3. Platform data directory (`~/.local/share/satchel`)
    pub fn data_dir(&self, override_dir: Option<&PathBuf>) -> PathBuf {
        override_dir
            .cloned()
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("satchel")
            })
    }

    /// Returns the local record database path under the resolved data
    /// directory.
    pub fn database_path(&self, override_dir: Option<&PathBuf>) -> PathBuf {
        self.data_dir(override_dir).join("records.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_has_no_remote() {
        let config = Config::default();
        assert!(config.remote.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn data_dir_prefers_explicit_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/config/satchel")),
            remote: None,
        };
        let override_dir = PathBuf::from("/explicit/satchel");
        assert_eq!(
            config.data_dir(Some(&override_dir)),
            PathBuf::from("/explicit/satchel")
        );
    }

    #[test]
    fn data_dir_falls_back_to_config() {
        let config = Config {
            data_dir: Some(PathBuf::from("/config/satchel")),
            remote: None,
        };
        assert_eq!(config.data_dir(None), PathBuf::from("/config/satchel"));
    }

    #[test]
    fn database_path_is_under_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/config/satchel")),
            remote: None,
        };
        assert_eq!(
            config.database_path(None),
            PathBuf::from("/config/satchel/records.db")
        );
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("satchel/config.toml"));
    }

    #[test]
    fn parses_remote_table() {
        let config: Config = toml::from_str(
            "data_dir = \"/tmp/satchel\"\n\n\
             [remote]\n\
             base_url = \"https://records.example.com\"\n\
             project_key = \"pk\"\n",
        )
        .unwrap();
        let remote = config.remote.expect("remote table should parse");
        assert_eq!(remote.base_url, "https://records.example.com");
        assert_eq!(remote.project_key, "pk");
    }
}
