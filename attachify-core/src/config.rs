use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Maximum records inspected when building a preview
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Default sequence start value for new rules
    #[serde(default = "default_sequence_start")]
    pub sequence_start: i64,

    /// Default zero-pad width for sequence tokens
    #[serde(default)]
    pub sequence_pad: i64,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_limit: default_preview_limit(),
            sequence_start: default_sequence_start(),
            sequence_pad: 0,
            use_color: None,
        }
    }
}

fn default_preview_limit() -> usize {
    crate::preview::PREVIEW_LIMIT
}

fn default_sequence_start() -> i64 {
    1
}

impl Config {
    /// Load config from .attachify/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(".attachify").join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        // Return default config if no config file exists
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
