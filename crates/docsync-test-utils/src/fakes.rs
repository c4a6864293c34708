//! In-memory collaborators for driving a sync run in tests.

use std::collections::{BTreeSet, HashSet};

use docsync_core::{ContentSource, Item, RemoteIndex, UploadRequest, Uploaded};

/// Error raised by the fakes on demand
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

/// A [`ContentSource`] serving a fixed list of items.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub items: Vec<Item>,
    /// When set, `fetch` fails with this message
    pub fail_with: Option<String>,
    /// Number of `fetch` calls so far
    pub fetches: usize,
}

impl MemorySource {
    pub fn new(items: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(identifier, content)| Item::new(identifier, content))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Replace the content served for `identifier`, appending if unknown
    pub fn set(&mut self, identifier: &str, content: &str) {
        match self.items.iter_mut().find(|i| i.identifier == identifier) {
            Some(item) => item.content = content.to_string(),
            None => self.items.push(Item::new(identifier, content)),
        }
    }
}

impl ContentSource for MemorySource {
    type Error = FakeError;

    fn fetch(&mut self) -> Result<Vec<Item>, FakeError> {
        self.fetches += 1;
        match &self.fail_with {
            Some(message) => Err(FakeError(message.clone())),
            None => Ok(self.items.clone()),
        }
    }
}

/// One upload as seen by [`ScriptedIndex`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub identifier: String,
    pub file_name: String,
    pub content: String,
    pub supersedes: Option<String>,
}

/// A [`RemoteIndex`] that hands out sequential references (`ref1`, `ref2`,
/// ...) and fails uploads for chosen identifiers.
///
/// Tracks which objects are live so tests can check that the state never
/// points at a deleted one.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndex {
    pub uploads: Vec<RecordedUpload>,
    pub live: BTreeSet<String>,
    pub deleted: Vec<String>,
    fail_for: HashSet<String>,
    fail_deletes: bool,
    next_id: usize,
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `references` already exist remotely
    pub fn with_live(references: &[&str]) -> Self {
        Self {
            live: references.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Make every upload for `identifier` fail
    pub fn fail_uploads_for(&mut self, identifier: &str) -> &mut Self {
        self.fail_for.insert(identifier.to_string());
        self
    }

    /// Make uploads succeed again for `identifier`
    pub fn heal(&mut self, identifier: &str) -> &mut Self {
        self.fail_for.remove(identifier);
        self
    }

    /// Keep superseded objects around, reporting them as orphaned
    pub fn fail_deletes(&mut self) -> &mut Self {
        self.fail_deletes = true;
        self
    }
}

impl RemoteIndex for ScriptedIndex {
    type Error = FakeError;

    fn upload(&mut self, request: &UploadRequest<'_>) -> Result<Uploaded, FakeError> {
        self.uploads.push(RecordedUpload {
            identifier: request.identifier.to_string(),
            file_name: request.file_name.clone(),
            content: request.content.to_string(),
            supersedes: request.supersedes.map(str::to_string),
        });

        if self.fail_for.contains(request.identifier) {
            return Err(FakeError(format!("upload rejected for {}", request.identifier)));
        }

        self.next_id += 1;
        let reference = format!("ref{}", self.next_id);
        self.live.insert(reference.clone());

        let mut uploaded = Uploaded::new(reference);
        if let Some(old) = request.supersedes {
            if self.fail_deletes {
                uploaded.orphaned = Some(old.to_string());
            } else {
                self.live.remove(old);
                self.deleted.push(old.to_string());
            }
        }
        Ok(uploaded)
    }
}
