//! The three vector-store calls a sync needs

use crate::Result;

/// Minimal file and vector-store API.
pub trait VectorStoreApi {
    /// Upload `content` as a new file and return its id.
    fn create_file(&mut self, file_name: &str, content: &str) -> Result<String>;

    /// Attach an uploaded file to the configured vector store.
    fn attach_file(&mut self, file_id: &str) -> Result<()>;

    /// Delete a file. Deleting a file also detaches it from vector stores.
    fn delete_file(&mut self, file_id: &str) -> Result<()>;
}
