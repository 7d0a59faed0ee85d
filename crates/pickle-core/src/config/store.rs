//! Config store for loading and saving pickle.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::PickleConfig;

pub const CONFIG_FILE_NAME: &str = "pickle.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at `<config dir>/pickle/pickle.toml`.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let global_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("pickle");
        Ok(Self::from_path(global_dir.join(CONFIG_FILE_NAME)))
    }

    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load(&self) -> anyhow::Result<PickleConfig> {
        if !self.config_path.exists() {
            return Ok(PickleConfig::new());
        }
        let content = std::fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;
        PickleConfig::from_toml(&content).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })
    }

    /// Write `config`, creating the parent directory as needed.
    pub fn save(&self, config: &PickleConfig) -> anyhow::Result<()> {
        let path = &self.config_path;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = config.to_toml().context("Failed to encode pickle.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Write a config file holding the defaults.
    ///
    /// An existing file is left alone unless `overwrite` is set; returns
    /// whether the file was written.
    pub fn init(&self, overwrite: bool) -> anyhow::Result<bool> {
        if self.config_path.exists() && !overwrite {
            tracing::debug!(path = %self.config_path.display(), "config file already exists");
            return Ok(false);
        }
        self.save(&PickleConfig::default())?;
        tracing::info!(path = %self.config_path.display(), "wrote default config");
        Ok(true)
    }
}
