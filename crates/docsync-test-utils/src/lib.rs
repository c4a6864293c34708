//! Shared test utilities for the docsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: in-memory [`ContentSource`](docsync_core::ContentSource) and
//!   [`RemoteIndex`](docsync_core::RemoteIndex) implementations
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace), a temp data
//!   directory wired to a [`SyncEngine`](docsync_core::SyncEngine)

pub mod fakes;
pub mod workspace;
