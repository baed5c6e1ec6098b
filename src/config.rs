//! Composer configuration persistence
//!
//! Stores positioning constants, the surface font and the proxy API base in
//! `~/.config/relay-compose/config.yaml`. Every field has a default, so a
//! partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::measure::FontSpec;
use crate::overlay::PositionConfig;

/// Default backend the SSE proxy may forward to
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variables that override `api_base_url`, checked in order
pub const API_BASE_ENV_VARS: [&str; 2] = ["RELAY_API_BASE_URL", "NEXT_PUBLIC_API_BASE_URL"];

/// Surface font plus the files used to measure it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FontConfig {
    #[serde(flatten)]
    pub spec: FontSpec,
    /// Regular face used for glyph measurement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Bold face, used when `weight` >= 600
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold_path: Option<PathBuf>,
}

/// Sizing of the auto-growing feedback input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackInputConfig {
    /// Height of a single empty row, in pixels
    pub min_height: f32,
    pub line_height: f32,
    /// Top + bottom padding inside the input
    pub vertical_padding: f32,
}

impl Default for FeedbackInputConfig {
    fn default() -> Self {
        Self {
            min_height: 44.0,
            line_height: 24.0,
            vertical_padding: 24.0,
        }
    }
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub positioning: PositionConfig,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub feedback_input: FeedbackInputConfig,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            positioning: PositionConfig::default(),
            font: FontConfig::default(),
            feedback_input: FeedbackInputConfig::default(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl ComposerConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default().with_env_overrides();
        };
        Self::load_from(&path).with_env_overrides()
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply `RELAY_API_BASE_URL` / `NEXT_PUBLIC_API_BASE_URL` if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = API_BASE_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        {
            tracing::debug!(api_base_url = %url, "API base overridden from environment");
            self.api_base_url = url;
        }
        self
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
