//! Change detection and sync-state reconciliation for docsync
//!
//! This crate decides what has to be uploaded and keeps the persisted sync
//! state consistent with the remote index, including when individual
//! uploads fail. It talks to the outside world only through the traits in
//! [`ports`].
//!
//! ```text
//!            docsync-cli
//!                 |
//!   +-------------+--------------+
//!   |             |              |
//! docsync-source  docsync-core  docsync-index
//!   |             |              |
//!   +------ ContentSource / RemoteIndex
//!                 |
//!            docsync-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docsync_core::{SyncConfig, SyncEngine, SyncOptions};
//!
//! let config = SyncConfig::load("docsync.toml".as_ref())?;
//! let engine = SyncEngine::from_paths(&config.paths);
//! let report = engine.run(&mut source, &mut index, &SyncOptions::default())?;
//! println!("{} added, {} updated", report.added, report.updated);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod item;
pub mod ports;
pub mod state;
pub mod sync;

pub use cache::ArticleCache;
pub use config::{IndexConfig, PathsConfig, SourceConfig, SyncConfig};
pub use error::{BoxError, Error, Result};
pub use item::Item;
pub use ports::{ContentSource, RemoteIndex, UploadRequest, Uploaded};
pub use state::{StateRecord, StateStore, SyncState};
pub use sync::{
    ChangeKind, OpOutcome, OpReport, PendingChanges, Plan, StatusReport, SyncEngine, SyncOp,
    SyncOptions, SyncReport, apply_outcome, reconcile,
};
