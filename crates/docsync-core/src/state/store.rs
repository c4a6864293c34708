//! JSON persistence for [`SyncState`]

use std::path::{Path, PathBuf};

use docsync_fs::{io, is_valid_checksum};

use super::SyncState;
use crate::{Error, Result};

/// Loads and saves the sync state file.
///
/// Saves replace the whole file through a temp-file-then-rename write, so a
/// crash mid-save leaves the previous state readable.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state.
    ///
    /// A missing file is a first run and yields an empty state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if it holds a digest this tool could not have produced.
    pub fn load(&self) -> Result<SyncState> {
        let Some(content) = io::read_text_if_exists(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no sync state yet, starting empty");
            return Ok(SyncState::new());
        };

        let state: SyncState =
            serde_json::from_str(&content).map_err(|e| Error::CorruptState {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        if let Some((identifier, record)) = state
            .iter()
            .find(|(_, record)| !is_valid_checksum(&record.digest))
        {
            return Err(Error::CorruptState {
                path: self.path.clone(),
                reason: format!("invalid digest {:?} for {}", record.digest, identifier),
            });
        }

        tracing::debug!(path = %self.path.display(), records = state.len(), "loaded sync state");
        Ok(state)
    }

    /// Replace the persisted state with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The previous file is
    /// left intact in that case.
    pub fn save(&self, state: &SyncState) -> Result<()> {
        let mut content = serde_json::to_string_pretty(state)?;
        content.push('\n');
        io::write_text(&self.path, &content)?;
        tracing::debug!(path = %self.path.display(), records = state.len(), "saved sync state");
        Ok(())
    }
}
