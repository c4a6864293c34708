//! Seams to the outside world
//!
//! The core never talks HTTP itself. A run borrows one [`ContentSource`] and
//! one [`RemoteIndex`]; both are constructed by the caller and live only as
//! long as that run.

use crate::Item;

/// Produces the current remote article set.
pub trait ContentSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every item, in source order.
    ///
    /// Must either return the complete set or fail; a partial set would make
    /// missing items look unchanged.
    fn fetch(&mut self) -> Result<Vec<Item>, Self::Error>;
}

/// A single upload handed to a [`RemoteIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest<'a> {
    pub identifier: &'a str,
    /// File name the index should store the content under
    pub file_name: String,
    pub content: &'a str,
    /// Live remote object this upload replaces, if any
    pub supersedes: Option<&'a str>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uploaded {
    /// Reference to the newly created remote object
    pub reference: String,
    /// Superseded reference that could not be deleted
    pub orphaned: Option<String>,
}

impl Uploaded {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            orphaned: None,
        }
    }
}

/// Accepts content and hands back references to the stored objects.
///
/// Implementations must create the replacement before deleting the object
/// named by `supersedes`. If the upload fails the old object has to stay
/// live, because the state keeps pointing at it.
pub trait RemoteIndex {
    type Error: std::error::Error + Send + Sync + 'static;

    fn upload(&mut self, request: &UploadRequest<'_>) -> Result<Uploaded, Self::Error>;
}
