use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

/// Overrides the settings file location when set.
pub const CONFIG_ENV_VAR: &str = "TIMEZONE_GRID_CONFIG";
pub const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$TIMEZONE_GRID_CONFIG`, else `settings.toml` in the platform config
    /// directory, else the working directory.
    pub fn from_environment() -> Self {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            return Self::new(path);
        }

        match ProjectDirs::from("com", "TimezoneGrid", "TimezoneGrid") {
            Some(dirs) => Self::new(dirs.config_dir().join(SETTINGS_FILE)),
            None => {
                log::warn!("Unable to resolve config directory; using current dir for settings");
                Self::new(SETTINGS_FILE)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the file. A missing file is not an error.
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    pub fn load_or_default(&self) -> Settings {
        match self.get() {
            Ok(settings) => {
                log::info!("Settings loaded from {}", self.path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                Settings::default()
            }
        }
    }

    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}
