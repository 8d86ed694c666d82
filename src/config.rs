//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the survey form
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SurveyConfig {
    /// Directory exported PDFs are written to
    pub export_dir: Option<PathBuf>,
}

impl SurveyConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("ar", "santa-ana", "relevamiento-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration, writing the defaults on first run
    pub fn load_or_create() -> Result<Self> {
        match Self::config_path() {
            Some(path) if !path.exists() => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to the user's config directory
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Where to write exports: the configured directory or the working directory
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
