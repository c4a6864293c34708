//! Run configuration
//!
//! Settings come from an optional TOML (or JSON) file, then environment
//! variables override individual values:
//!
//! | Variable           | Overrides               |
//! |--------------------|-------------------------|
//! | `VECTOR_STORE_ID`  | `index.vector_store_id` |
//! | `MAX_ARTICLES`     | `source.max_articles`   |
//! | `DOCSYNC_DATA_DIR` | `paths.data_dir`        |
//!
//! Credentials are never read from the file.

use std::path::{Path, PathBuf};

use docsync_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const ENV_VECTOR_STORE_ID: &str = "VECTOR_STORE_ID";
pub const ENV_MAX_ARTICLES: &str = "MAX_ARTICLES";
pub const ENV_DATA_DIR: &str = "DOCSYNC_DATA_DIR";

/// Complete configuration for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub source: SourceConfig,
    pub index: IndexConfig,
    pub paths: PathsConfig,
}

/// Help-center API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub locale: String,
    pub per_page: u32,
    /// Stop after this many articles; 0 means no limit
    pub max_articles: usize,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://support.optisigns.com".to_string(),
            locale: "en-us".to_string(),
            per_page: 30,
            max_articles: 0,
            timeout_secs: 15,
        }
    }
}

/// Vector-store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub api_base: String,
    pub vector_store_id: Option<String>,
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            vector_store_id: None,
            timeout_secs: 60,
        }
    }
}

impl IndexConfig {
    /// The vector store to sync into, required before any upload
    pub fn require_vector_store_id(&self) -> Result<&str> {
        self.vector_store_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "no vector store configured; set {} or index.vector_store_id",
                    ENV_VECTOR_STORE_ID
                ))
            })
    }
}

/// Where local artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl PathsConfig {
    pub fn state_file(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.data_dir.join("articles")
    }
}

impl SyncConfig {
    /// Load the config file at `path` (defaults if absent) and apply
    /// overrides from the process environment.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: SyncConfig = ConfigStore::new().load_or_default(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if `MAX_ARTICLES` is not a non-negative integer.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(id) = lookup(ENV_VECTOR_STORE_ID).filter(|v| !v.trim().is_empty()) {
            self.index.vector_store_id = Some(id.trim().to_string());
        }

        if let Some(raw) = lookup(ENV_MAX_ARTICLES) {
            self.source.max_articles = raw.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{} must be a non-negative integer, got {:?}",
                    ENV_MAX_ARTICLES, raw
                ))
            })?;
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.paths.data_dir = PathBuf::from(dir);
        }

        Ok(())
    }
}
