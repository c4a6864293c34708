//! Format-agnostic loading and saving of serde documents

use crate::{Error, Result, io};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Format-agnostic document store.
///
/// Detects the format from the file extension (`.toml` or `.json`) and
/// handles serialization transparently. Saves go through
/// [`io::write_atomic`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        parse(path, &content)
    }

    /// Load a document, falling back to `T::default()` when the file is absent.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        match io::read_text_if_exists(path)? {
            Some(content) => parse(path, &content),
            None => {
                tracing::debug!(path = %path.display(), "no file found, using defaults");
                Ok(T::default())
            }
        }
    }

    /// Save a document to a file, replacing it wholesale.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = match extension(path).as_str() {
            "toml" => toml::to_string_pretty(value).map_err(|e| Error::Serialize {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            })?,
            "json" => {
                let mut json = serde_json::to_string_pretty(value).map_err(|e| Error::Serialize {
                    path: path.to_path_buf(),
                    format: "JSON".into(),
                    message: e.to_string(),
                })?;
                json.push('\n');
                json
            }
            other => {
                return Err(Error::UnsupportedFormat {
                    extension: other.to_string(),
                });
            }
        };

        io::write_atomic(path, content.as_bytes())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    match extension(path).as_str() {
        "toml" => toml::from_str(content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        }),
        "json" => serde_json::from_str(content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            format: "JSON".into(),
            message: e.to_string(),
        }),
        other => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
