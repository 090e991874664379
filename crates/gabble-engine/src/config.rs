//! Configuration types for gabble.
//!
//! Settings come from a JSON file (usually `.gabble/config.json`) and are
//! then overlaid with `GEMINI_*` environment variables.

use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model.
pub const MODEL_ENV: &str = "GEMINI_MODEL";
/// Environment variable overriding the API host.
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Main configuration for gabble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API key sent as the `key` query parameter. Not validated locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name, e.g. `gemini-1.5-flash`.
    #[serde(default = "default_model")]
    pub model: String,

    /// API host.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout. Absent means wait for the transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Color theme.
    #[serde(default)]
    pub theme: ThemeChoice,

    /// Glyph set for avatars and status icons.
    #[serde(default)]
    pub icons: IconChoice,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

/// Color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    /// Catppuccin Mocha (dark).
    #[default]
    Mocha,
    /// Catppuccin Latte (light).
    Latte,
    /// High contrast.
    HighContrast,
}

/// Icon set selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconChoice {
    /// Nerd Font glyphs.
    #[default]
    Nerd,
    /// Plain Unicode symbols.
    Unicode,
    /// ASCII only.
    Ascii,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: None,
            theme: ThemeChoice::default(),
            icons: IconChoice::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load `path` if it exists (defaults otherwise) and apply the process environment.
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            debug!(path = %path.display(), "loading config");
            Self::load(path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());

        if config.api_key.as_deref().unwrap_or_default().is_empty() {
            warn!("no API key configured; requests will be rejected by the service");
        }
        Ok(config)
    }

    /// Overlay values from an environment lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.model = model;
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if get("NO_COLOR").is_some() {
            self.icons = IconChoice::Ascii;
        }
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// The API key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            None | Some("") => "(not set)".into(),
            Some(key) => {
                let count = key.chars().count();
                if count <= 4 {
                    "*".repeat(count)
                } else {
                    let tail: String = key.chars().skip(count - 4).collect();
                    format!("{}{tail}", "*".repeat(count - 4))
                }
            }
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
        assert!(config.request_timeout().is_none());
        assert_eq!(config.theme, ThemeChoice::Mocha);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"model":"gemini-pro","theme":"high_contrast"}"#).unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.theme, ThemeChoice::HighContrast);
        assert_eq!(config.icons, IconChoice::Nerd);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_key: Some("secret".into()),
            request_timeout_secs: Some(30),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (API_KEY_ENV, "from-env"),
            (MODEL_ENV, "gemini-2.0-flash"),
            (BASE_URL_ENV, ""),
            ("NO_COLOR", "1"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(ToString::to_string));

        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.model, "gemini-2.0-flash");
        // Empty values leave the setting alone.
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.icons, IconChoice::Ascii);
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = Config::default();
        assert_eq!(config.masked_api_key(), "(not set)");

        config.api_key = Some("abcd".into());
        assert_eq!(config.masked_api_key(), "****");

        config.api_key = Some("AIzaSy1234".into());
        assert_eq!(config.masked_api_key(), "******1234");
    }
}
