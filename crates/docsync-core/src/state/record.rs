//! Per-identifier sync records

use serde::{Deserialize, Serialize};

/// What the last successful run knows about one identifier.
///
/// `remote_reference` is `None` only while an upload is pending. A record
/// that has been through an upload attempt is never persisted without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// Fingerprint of the content last written for this identifier
    #[serde(alias = "hash")]
    pub digest: String,
    /// Remote index object currently holding that content
    #[serde(alias = "file_id", default)]
    pub remote_reference: Option<String>,
}

impl StateRecord {
    /// A record whose upload has not completed yet
    pub fn pending(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            remote_reference: None,
        }
    }

    /// A record backed by a live remote object
    pub fn synced(digest: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            remote_reference: Some(reference.into()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.remote_reference.is_none()
    }
}
