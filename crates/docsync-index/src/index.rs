//! Upload-then-supersede sequencing

use docsync_core::{RemoteIndex, UploadRequest, Uploaded};

use crate::{IndexError, VectorStoreApi};

/// [`RemoteIndex`] over a [`VectorStoreApi`].
///
/// Order per upload: create the new file, attach it, and only then delete the
/// superseded file. A failure before the delete leaves the old file live, so
/// the state that still points at it stays valid.
#[derive(Debug)]
pub struct VectorStoreIndex<A> {
    api: A,
}

impl<A: VectorStoreApi> VectorStoreIndex<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: VectorStoreApi> RemoteIndex for VectorStoreIndex<A> {
    type Error = IndexError;

    fn upload(&mut self, request: &UploadRequest<'_>) -> Result<Uploaded, IndexError> {
        let file_id = self.api.create_file(&request.file_name, request.content)?;

        if let Err(e) = self.api.attach_file(&file_id) {
            // Don't leave an unattached file behind; the op fails either way
            if let Err(cleanup) = self.api.delete_file(&file_id) {
                tracing::warn!(%file_id, error = %cleanup, "failed to remove unattached file");
            }
            return Err(e);
        }

        let mut uploaded = Uploaded::new(file_id);
        if let Some(old) = request.supersedes {
            match self.api.delete_file(old) {
                Ok(()) => tracing::debug!(file_id = %old, "deleted superseded file"),
                Err(e) => {
                    tracing::warn!(file_id = %old, error = %e, "failed to delete superseded file");
                    uploaded.orphaned = Some(old.to_string());
                }
            }
        }
        Ok(uploaded)
    }
}
