use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::SheetLayout;

const ENV_PREFIX: &str = "TIMEGRID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimegridConfig {
    /// The spreadsheet holding the `Days` and `Categories` sheets.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default = "default_days_sheet")]
    pub days_sheet: String,
    #[serde(default = "default_categories_sheet")]
    pub categories_sheet: String,
    /// `tracing` filter directive for the log file.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_days_sheet() -> String {
    "Days".to_string()
}

fn default_categories_sheet() -> String {
    "Categories".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TimegridConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            days_sheet: default_days_sheet(),
            categories_sheet: default_categories_sheet(),
            log_level: default_log_level(),
        }
    }
}

impl TimegridConfig {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("timegrid"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from the config file, if any, with `TIMEGRID_*` environment variables on top.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layered(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, env: config::Environment) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    /// Write a default config file if there is none yet.
    pub fn ensure_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }
        Ok(())
    }

    pub fn spreadsheet_id(&self) -> Result<&str> {
        self.spreadsheet_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .context("No spreadsheet configured. Run `timegrid setup --key <file.json> --spreadsheet-id <id>` first.")
    }

    pub fn layout(&self) -> SheetLayout {
        SheetLayout {
            days_sheet: self.days_sheet.clone(),
            categories_sheet: self.categories_sheet.clone(),
        }
    }
}
