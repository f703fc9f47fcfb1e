use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::store::{Document, DocumentStore};
use crate::types::Revision;

#[derive(Debug, Default)]
struct Inner {
    docs: HashMap<String, Document>,
    next_revision: u64,
}

/// Document store kept in memory.
///
/// Revisions are sequential numbers; conflict rules match the GitHub store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.lock().docs.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paths of all stored documents, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.lock().docs.keys().cloned().collect();
        paths.sort();
        paths
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Document>> {
        Ok(self.lock().docs.get(path).cloned())
    }

    async fn put(
        &self,
        path: &str,
        content: &str,
        revision: Option<&Revision>,
        _message: &str,
    ) -> Result<Revision> {
        let mut inner = self.lock();

        let current = inner.docs.get(path).map(|d| &d.revision);
        if current != revision {
            return Err(Error::Conflict { path: path.to_string() });
        }

        inner.next_revision += 1;
        let revision = Revision::new(format!("{:040x}", inner.next_revision));
        inner.docs.insert(
            path.to_string(),
            Document { content: content.to_string(), revision: revision.clone() },
        );
        Ok(revision)
    }

    async fn delete(&self, path: &str, revision: &Revision, _message: &str) -> Result<()> {
        let mut inner = self.lock();

        match inner.docs.get(path) {
            None => Err(Error::store_status(format!("{path} does not exist"), 404)),
            Some(doc) if &doc.revision != revision => Err(Error::Conflict { path: path.to_string() }),
            Some(_) => {
                inner.docs.remove(path);
                Ok(())
            }
        }
    }
}
