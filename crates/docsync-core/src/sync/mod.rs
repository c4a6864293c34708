//! Reconciliation between fetched content, sync state and the remote index
//!
//! - **reconcile**: classify fetched items and plan uploads
//! - **engine**: run a full sync against a source and an index
//! - **status**: inspect the state and pending changes

mod engine;
pub mod reconcile;
mod status;

pub use engine::{OpReport, SyncEngine, SyncOptions, SyncReport, stale_identifiers};
pub use reconcile::{ChangeKind, OpOutcome, Plan, SyncOp, apply_outcome, live_reference, reconcile};
pub use status::{PendingChanges, StatusReport};
