//! [`TestWorkspace`]: a throwaway data directory for sync scenarios.

use std::path::{Path, PathBuf};

use docsync_core::{PathsConfig, StateRecord, SyncEngine, SyncState};
use tempfile::TempDir;

/// Temporary data directory plus helpers to seed and inspect state.
///
/// # Example
///
/// ```rust,no_run
/// use docsync_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// let engine = ws.engine();
/// assert!(ws.state().is_empty());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn paths(&self) -> PathsConfig {
        PathsConfig {
            data_dir: self.root().join("data"),
        }
    }

    pub fn engine(&self) -> SyncEngine {
        SyncEngine::from_paths(&self.paths())
    }

    pub fn state_file(&self) -> PathBuf {
        self.paths().state_file()
    }

    /// Current persisted state, empty if none was written
    pub fn state(&self) -> SyncState {
        self.engine().store().load().unwrap()
    }

    /// Raw bytes of the state file, `None` if it does not exist
    pub fn state_bytes(&self) -> Option<Vec<u8>> {
        std::fs::read(self.state_file()).ok()
    }

    /// Persist `entries` as `(identifier, content, reference)` triples
    pub fn seed(&self, entries: &[(&str, &str, &str)]) -> SyncState {
        let state: SyncState = entries
            .iter()
            .map(|(id, content, reference)| {
                (
                    id.to_string(),
                    StateRecord::synced(docsync_core::Item::new(*id, *content).digest(), *reference),
                )
            })
            .collect();
        self.engine().store().save(&state).unwrap();
        state
    }

    /// Content of a cached article, `None` if it was never written
    pub fn cached(&self, identifier: &str) -> Option<String> {
        std::fs::read_to_string(self.paths().articles_dir().join(format!("{}.md", identifier))).ok()
    }
}
