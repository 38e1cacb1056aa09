//! Client configuration for songrec
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Paths;

/// Environment variable that overrides the configured backend URL
const API_URL_ENV: &str = "SONGREC_API_URL";

/// Client configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the recommendation backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Host the local web surface binds to
    #[serde(default = "default_serve_host")]
    pub serve_host: String,

    /// Port the local web surface listens on
    #[serde(default = "default_serve_port")]
    pub serve_port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            serve_host: default_serve_host(),
            serve_port: default_serve_port(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the settings file, applying the env override
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let config = Self::load_from(&paths.settings_path())?;
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    /// Load configuration from a specific file, writing defaults when missing
    pub fn load_from(settings_path: &Path) -> Result<Self> {
        if settings_path.exists() {
            let content =
                std::fs::read_to_string(settings_path).context("Failed to read settings file")?;
            let config: ClientConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(settings_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Replace the backend URL when an override is present and non-empty
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() {
                self.api_url = url;
            }
        }
        self
    }
}

// Default value functions for serde

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_serve_host() -> String {
    "127.0.0.1".to_string()
}

fn default_serve_port() -> u16 {
    3000
}
