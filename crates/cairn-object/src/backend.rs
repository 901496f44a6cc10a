//! Storage backend contract and its `object_store` implementation.

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::TRACING_TARGET;
use crate::client::DEFAULT_PAGE_SIZE;
use crate::providers::Connector;
use crate::types::{Error, ObjectSummary};

/// Raw object content, fetched lazily as the stream is polled.
pub type ByteStream = BoxStream<'static, Result<Bytes, Error>>;

/// What resource discovery needs from a remote blob store.
///
/// Credential and region resolution are the implementation's concern.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// List objects in `container` whose key starts with `prefix`.
    ///
    /// `None` lists the whole container. Implementations return a single
    /// page of results and do not paginate further.
    async fn list(&self, container: &str, prefix: Option<&str>)
    -> Result<Vec<ObjectSummary>, Error>;

    /// Fetch the object stored at `key` in `container`.
    async fn get(&self, container: &str, key: &str) -> Result<ByteStream, Error>;
}

/// [`StorageBackend`] that opens a fresh [`ObjectStoreClient`] through a
/// [`Connector`] for every call.
///
/// [`ObjectStoreClient`]: crate::client::ObjectStoreClient
#[derive(Debug, Clone)]
pub struct ObjectStoreBackend<C> {
    connector: C,
    page_size: usize,
}

impl<C: Connector> ObjectStoreBackend<C> {
    /// Create a backend using `connector` and the default page size.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the maximum number of objects returned by one listing.
    ///
    /// A page size of zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[async_trait::async_trait]
impl<C: Connector> StorageBackend for ObjectStoreBackend<C> {
    async fn list(
        &self,
        container: &str,
        prefix: Option<&str>,
    ) -> Result<Vec<ObjectSummary>, Error> {
        let client = self.connector.connect(container)?;
        let page = client
            .list_page(prefix.unwrap_or_default(), self.page_size)
            .await?;

        if page.truncated {
            tracing::debug!(
                target: TRACING_TARGET,
                provider = C::ID,
                container,
                prefix,
                page_size = self.page_size,
                "listing stopped at the page size"
            );
        }

        Ok(page
            .objects
            .into_iter()
            .map(|meta| {
                ObjectSummary::new(container, meta.location.to_string()).with_size(meta.size)
            })
            .collect())
    }

    async fn get(&self, container: &str, key: &str) -> Result<ByteStream, Error> {
        let client = self.connector.connect(container)?;
        let output = client.get_stream(key).await?;
        tracing::trace!(
            target: TRACING_TARGET,
            provider = C::ID,
            container,
            key,
            size = output.meta.size,
            "opened object stream"
        );
        Ok(output.stream)
    }
}
