//! Text resource backed by an object in remote storage.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use cairn_object::{ObjectSummary, StorageBackend};

use super::{TextResource, TextStream};
use crate::TRACING_TARGET;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};

/// One listed object, readable on demand.
///
/// Equality, ordering and hashing use only the absolute path
/// (`container/key`).
#[derive(Clone)]
pub struct RemoteTextResource {
    summary: ObjectSummary,
    path: String,
    encoding: TextEncoding,
    backend: Arc<dyn StorageBackend>,
}

impl RemoteTextResource {
    /// Creates a resource for `summary`, read through `backend`.
    pub fn new(
        summary: ObjectSummary,
        encoding: TextEncoding,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        let path = summary.to_string();
        Self {
            summary,
            path,
            encoding,
            backend,
        }
    }

    /// Container (bucket) holding the object.
    pub fn container(&self) -> &str {
        self.summary.container()
    }

    /// Full key of the object.
    pub fn key(&self) -> &str {
        self.summary.key()
    }

    /// Encoding used by [`read`](TextResource::read).
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Object size reported by the listing, if any.
    pub fn size(&self) -> Option<u64> {
        self.summary.size()
    }
}

#[async_trait::async_trait]
impl TextResource for RemoteTextResource {
    async fn read(&self) -> Result<TextStream> {
        let bytes = self
            .backend
            .get(self.summary.container(), self.summary.key())
            .await
            .map_err(|source| {
                tracing::error!(
                    target: TRACING_TARGET,
                    path = %self.path,
                    error = %source,
                    "failed to get object from storage"
                );
                Error::storage_access(self.path.clone(), source)
            })?;

        Ok(TextStream::new(self.path.clone(), self.encoding, bytes))
    }

    fn absolute_path(&self) -> &str {
        &self.path
    }

    fn absolute_path_on_disk(&self) -> &str {
        &self.path
    }

    fn filename(&self) -> &str {
        let key = self.summary.key();
        key.rsplit_once('/').map_or(key, |(_, name)| name)
    }

    fn relative_path(&self) -> &str {
        &self.path
    }
}

impl PartialEq for RemoteTextResource {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for RemoteTextResource {}

impl PartialOrd for RemoteTextResource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RemoteTextResource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl Hash for RemoteTextResource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Debug for RemoteTextResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTextResource")
            .field("path", &self.path)
            .field("encoding", &self.encoding)
            .field("size", &self.summary.size())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RemoteTextResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
