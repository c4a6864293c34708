//! Command implementations

mod status;
mod sync;

pub use status::run_status;
pub use sync::run_sync;

use std::path::Path;

use docsync_core::{SyncConfig, SyncEngine};

use crate::error::Result;

/// Load the run configuration and the engine it describes
fn load(config_path: &Path) -> Result<(SyncConfig, SyncEngine)> {
    let config = SyncConfig::load(config_path)?;
    tracing::debug!(
        config = %config_path.display(),
        data_dir = %config.paths.data_dir.display(),
        "configuration loaded"
    );
    let engine = SyncEngine::from_paths(&config.paths);
    Ok((config, engine))
}
