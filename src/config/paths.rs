//! Path management for songrec
//!
//! This module manages all filesystem paths used by the client.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Manages all filesystem paths for the client
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(config: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(config)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    pub(crate) fn new(config_override: Option<PathBuf>) -> Result<Self> {
        // an explicit override is used as-is, otherwise fall back to the platform dir
        let config_dir = config_override.unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "songrec")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".songrec"))
        });

        let paths = Self { config_dir };

        paths.create_directories()?;

        Ok(paths)
    }

    fn create_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!("Failed to create config directory {:?}", self.config_dir)
        })?;
        Ok(())
    }

    // ========== Getters ==========

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Get the file holding the logged-in username
    pub fn session_path(&self) -> PathBuf {
        self.config_dir.join("session")
    }

    /// Get the static web client directory served by `serve`
    pub fn client_dir(&self) -> PathBuf {
        self.config_dir.join("client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let config = Some(temp_dir.path().join("songrec"));

        // Note: Can't use init() in tests due to OnceCell
        let paths = Paths::new(config).unwrap();

        assert!(paths.config_dir().exists());
        assert!(paths.config_dir().starts_with(temp_dir.path()));
        assert_eq!(paths.session_path(), paths.config_dir().join("session"));
        assert!(paths.settings_path().ends_with("settings.json"));
    }
}
