//! Fetched content items

use serde::{Deserialize, Serialize};

/// One article as produced by a content source.
///
/// `identifier` is expected to be stable across runs. It is not required to
/// be unique within one fetch; see [`crate::sync::reconcile`] for how
/// duplicates are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub identifier: String,
    pub content: String,
}

impl Item {
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }

    /// Content fingerprint used for change detection
    pub fn digest(&self) -> String {
        docsync_fs::compute_content_checksum(&self.content)
    }
}
