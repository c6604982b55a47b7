use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{ACCESS_KEY_ENV, APP_DIR, DEFAULT_API_URL, DEFAULT_BATCH_SIZE};

const CONFIG_FILE: &str = "config.yaml";

/// Runtime configuration, read from `~/.wallpaper-browser/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Photo API base URL
    pub api_url: String,
    /// Static API credential sent as `client_id`
    pub access_key: String,
    /// Records requested per load
    pub batch_size: u32,
    /// Where saved wallpapers end up (defaults to `<Pictures>/Wallpapers`)
    pub library_dir: Option<PathBuf>,
    /// Download staging area (defaults to `<cache>/wallpaper-browser/downloads`)
    pub staging_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: String::from(DEFAULT_API_URL),
            access_key: String::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            library_dir: None,
            staging_dir: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply the environment override
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&app_dir().join(CONFIG_FILE))?;
        config.apply_access_key(std::env::var(ACCESS_KEY_ENV).ok());
        Ok(config)
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Replace the access key when a non-empty override is given
    pub fn apply_access_key(&mut self, key: Option<String>) {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.access_key = key;
        }
    }

    /// Fail early when no credential is configured
    pub fn validate(&self) -> Result<()> {
        if self.access_key.is_empty() {
            anyhow::bail!(
                "no Unsplash access key configured: set {} or `access_key` in {}",
                ACCESS_KEY_ENV,
                app_dir().join(CONFIG_FILE).display()
            );
        }
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be at least 1");
        }
        Ok(())
    }

    pub fn library_dir(&self) -> PathBuf {
        self.library_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Wallpapers")
        })
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("wallpaper-browser")
                .join("downloads")
        })
    }
}

/// Application directory holding config and logs
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
