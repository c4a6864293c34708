//! Vector-store remote index for docsync
//!
//! [`VectorStoreIndex`] implements the core's
//! [`RemoteIndex`](docsync_core::RemoteIndex) on top of any
//! [`VectorStoreApi`]. [`OpenAiClient`] is the production API, speaking the
//! OpenAI files and vector-store endpoints.

pub mod api;
pub mod error;
pub mod index;
pub mod openai;

pub use api::VectorStoreApi;
pub use error::{IndexError, Result};
pub use index::VectorStoreIndex;
pub use openai::{ENV_API_KEY, OpenAiClient};

/// Index backed by the OpenAI API
pub type OpenAiIndex = VectorStoreIndex<OpenAiClient>;
