use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Public LanguageTool endpoint used when none is configured
pub const DEFAULT_LANGUAGETOOL_URL: &str = "https://api.languagetool.org/v2/check";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub manuscript_path: PathBuf,
    /// Proofreading language code, e.g. `es` or `en`
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_languagetool_url")]
    pub languagetool_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_language() -> String {
    "es".to_string()
}

fn default_languagetool_url() -> String {
    DEFAULT_LANGUAGETOOL_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Config for a manuscript with every other setting at its default
    pub fn new(manuscript_path: impl Into<PathBuf>) -> Self {
        Self {
            manuscript_path: manuscript_path.into(),
            language: default_language(),
            languagetool_url: default_languagetool_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the manuscript path
        config.manuscript_path =
            Self::expand_path(&config.manuscript_path).unwrap_or(config.manuscript_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/quill");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and `$VAR` references; `None` when a variable is undefined
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
