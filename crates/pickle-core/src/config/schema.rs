//! Configuration schema for pickle.toml

use serde::{Deserialize, Serialize};

use crate::package::DEFAULT_REGISTRY_BASE;

/// Root configuration structure for pickle.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PickleConfig {
    /// Artifact registry settings
    #[serde(default)]
    pub registry: RegistrySection,

    /// Distribution download settings
    #[serde(default)]
    pub download: DownloadSection,

    /// Source-control checkout settings
    #[serde(default)]
    pub git: GitSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Root URL that registry package names are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSection {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Artifacts larger than this are rejected
    #[serde(default = "default_max_archive_bytes")]
    pub max_archive_bytes: u64,
}

impl Default for DownloadSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_archive_bytes: default_max_archive_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSection {
    /// git executable used for checkouts
    #[serde(default = "default_git_program")]
    pub program: String,
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            program: default_git_program(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_REGISTRY_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_archive_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_git_program() -> String {
    "git".to_string()
}

impl PickleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
