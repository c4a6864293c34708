//! Filesystem primitives for docsync
//!
//! Provides content fingerprinting, crash-safe writes and format-agnostic
//! config loading. Everything that touches disk in the other crates goes
//! through here.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;

pub use checksum::{compute_content_checksum, is_valid_checksum};
pub use config::ConfigStore;
pub use error::{Error, Result};
