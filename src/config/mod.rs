//! Configuration and credentials.
//!
//! The API key comes from, in priority order: the `--api-key` flag, the
//! `LINEAR_API_KEY` environment variable (both arrive through clap), then
//! the `api_key` entry in `~/.config/linr/config.toml`. The config file can
//! also set a `default_team` used when a command omits `--team`.

use serde::Deserialize;
use std::path::PathBuf;

/// Errors loading or interpreting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(
        "No API key found. Pass --api-key, set LINEAR_API_KEY, or add \
         api_key to {0}.\nGet a key from: https://linear.app/settings/api"
    )]
    MissingApiKey(String),
}

/// Contents of `~/.config/linr/config.toml`. All keys optional.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Linear personal API key.
    pub api_key: Option<String>,
    /// Team key or name used when a command omits --team.
    pub default_team: Option<String>,
}

impl Config {
    /// Load the config file if it exists; an absent file is an empty config.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
            }
            _ => Ok(Self::default()),
        }
    }

    /// `~/.config/linr/config.toml` (following XDG overrides).
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("linr").join("config.toml"))
    }

    /// Settle the API key from flag/env value and config, in that order.
    pub fn api_key(&self, flag_or_env: Option<String>) -> Result<String, ConfigError> {
        flag_or_env
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                let path = Self::path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "~/.config/linr/config.toml".to_string());
                ConfigError::MissingApiKey(path)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_config_key() {
        let config = Config {
            api_key: Some("from-config".to_string()),
            default_team: None,
        };
        assert_eq!(
            config.api_key(Some("from-flag".to_string())).unwrap(),
            "from-flag"
        );
    }

    #[test]
    fn config_key_is_the_fallback() {
        let config = Config {
            api_key: Some("from-config".to_string()),
            default_team: None,
        };
        assert_eq!(config.api_key(None).unwrap(), "from-config");
    }

    #[test]
    fn missing_key_names_the_config_path() {
        let config = Config::default();
        let err = config.api_key(None).unwrap_err();
        assert!(err.to_string().contains("LINEAR_API_KEY"));
    }

    #[test]
    fn config_parses_known_keys() {
        let config: Config =
            toml::from_str("api_key = \"lin_api_x\"\ndefault_team = \"ENG\"").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("lin_api_x"));
        assert_eq!(config.default_team.as_deref(), Some("ENG"));
    }
}
