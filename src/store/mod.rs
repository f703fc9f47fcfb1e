//! Remote document storage.
//!
//! Songs are JSON documents in a version-controlled repository. The store is
//! a plain path-keyed document map with optimistic concurrency: every read
//! returns a [`Revision`], and writes and deletes must present the revision
//! they are replacing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Revision;

/// GitHub contents API backend
pub mod github;
/// In-process backend for tests and dry runs
pub mod memory;
/// Song documents and the song list index
pub mod songs;

pub use github::GitHubStore;
pub use memory::MemoryStore;
pub use songs::SongRepository;

/// A stored document and the revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Document text.
    pub content: String,
    /// Token to present when replacing or deleting this document.
    pub revision: Revision,
}

/// Path-keyed document storage with optimistic concurrency.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document; `None` if nothing is stored at `path`.
    async fn get(&self, path: &str) -> Result<Option<Document>>;

    /// Create (`revision == None`) or replace a document.
    ///
    /// Fails with [`crate::error::Error::Conflict`] when `revision` does not
    /// match what is stored. Returns the new revision.
    async fn put(
        &self,
        path: &str,
        content: &str,
        revision: Option<&Revision>,
        message: &str,
    ) -> Result<Revision>;

    /// Delete the document at `path`, which must still be at `revision`.
    async fn delete(&self, path: &str, revision: &Revision, message: &str) -> Result<()>;
}
