use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::calendar::WindowDays;
use crate::repository::file::default_data_dir;

pub const CONFIG_ENV_VAR: &str = "UTILBOARD_CONFIG";
const DEFAULT_CONFIG_FILE_NAME: &str = "utilboard.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where `readings.json` lives. Defaults to `~/.utilboard`.
    pub data_dir: Option<PathBuf>,
    /// Write a week of sample readings when the store is empty.
    pub seed_sample_data: bool,
    pub default_window_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: None,
            seed_sample_data: true,
            default_window_days: 7,
        }
    }
}

impl AppConfig {
    /// Loads from `$UTILBOARD_CONFIG`, else `utilboard.toml` in the default data dir.
    /// A missing file, or no home directory to look in, gives the defaults.
    pub fn load() -> Result<Self> {
        let explicit = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_with(explicit, default_data_dir)
    }

    fn load_with(
        explicit: Option<PathBuf>,
        data_dir: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match data_dir() {
            Ok(dir) => Self::load_from(dir.join(DEFAULT_CONFIG_FILE_NAME)),
            Err(e) => {
                tracing::warn!("{:#}; using default config", e);
                Ok(AppConfig::default())
            }
        }
    }

    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn default_window(&self) -> Result<WindowDays> {
        Ok(WindowDays::new(self.default_window_days)?)
    }
}
