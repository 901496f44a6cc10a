//! Object-store client backed by [`object_store::ObjectStore`].
//!
//! [`ObjectStoreClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectStore>` scoped to a single container. Every public method
//! is instrumented with [`tracing`] for observability.

use std::sync::Arc;

use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

use crate::types::Error;

mod get_output;
mod list_page;

pub use get_output::GetOutput;
pub use list_page::ListPage;

/// Number of keys returned by a single S3 `ListObjectsV2` request.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Cloneable handle to any [`ObjectStore`] backend (S3, Azure, GCS, ...).
///
/// Keys are passed through verbatim: `sql/V1__a#b.sql` names the stored
/// object `sql/V1__a#b.sql`, not a percent-encoded variant.
#[derive(Clone, Debug)]
pub struct ObjectStoreClient(pub Arc<dyn ObjectStore>);

impl ObjectStoreClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// List at most `page_size` objects whose key starts with `prefix`.
    ///
    /// `prefix` is a plain string prefix: `migrations/V1` matches
    /// `migrations/V1__init.sql`, and `migrations` also matches
    /// `migrations_old/a.sql`. The listing starts right after `prefix` and
    /// ends at the first key sorting past every match, which relies on the
    /// store returning keys in lexicographic order (S3, GCS, Azure and
    /// the in-memory store do). An object named exactly `prefix` is not
    /// returned.
    #[tracing::instrument(name = "object.list_page", skip(self), fields(count, truncated))]
    pub async fn list_page(&self, prefix: &str, page_size: usize) -> Result<ListPage, Error> {
        let directory = match prefix.rsplit_once('/') {
            Some((directory, _)) if !directory.is_empty() => Some(parse_key(directory)?),
            _ => None,
        };
        let offset = match prefix {
            "" => None,
            prefix => Path::parse(prefix).ok(),
        };

        let mut stream = match &offset {
            Some(offset) => self.0.list_with_offset(directory.as_ref(), offset),
            None => self.0.list(directory.as_ref()),
        };
        let mut page = ListPage::default();

        while let Some(meta) = stream.try_next().await? {
            let key: &str = meta.location.as_ref();
            if !key.starts_with(prefix) {
                // Keys after the offset that miss the prefix sort past all matches.
                if offset.is_some() {
                    break;
                }
                continue;
            }
            page.objects.push(meta);
            if page.objects.len() >= page_size {
                page.truncated = true;
                break;
            }
        }

        let span = tracing::Span::current();
        span.record("count", page.objects.len());
        span.record("truncated", page.truncated);
        Ok(page)
    }

    /// Open the object stored at `key` as a lazily fetched byte stream.
    #[tracing::instrument(name = "object.get_stream", skip(self))]
    pub async fn get_stream(&self, key: &str) -> Result<GetOutput, Error> {
        let path = parse_key(key)?;
        let result = self.0.get(&path).await?;
        let meta = result.meta.clone();
        let stream = result.into_stream().map_err(Error::from).boxed();
        Ok(GetOutput { stream, meta })
    }

    /// Upload `data` to `key`, overwriting any existing object.
    #[tracing::instrument(name = "object.put", skip(self, data), fields(size = data.len()))]
    pub async fn put(&self, key: &str, data: Bytes) -> Result<(), Error> {
        let path = parse_key(key)?;
        self.0.put(&path, PutPayload::from(data)).await?;
        Ok(())
    }
}

/// Interprets `key` as a stored object key without re-encoding it.
fn parse_key(key: &str) -> Result<Path, Error> {
    Path::parse(key).map_err(|e| Error::runtime(&e, "object-store", false).with_source(e))
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    fn test_client() -> ObjectStoreClient {
        ObjectStoreClient::new(InMemory::new())
    }

    fn keys(page: &ListPage) -> Vec<String> {
        page.objects
            .iter()
            .map(|meta| meta.location.to_string())
            .collect()
    }

    #[tokio::test]
    async fn put_and_get_stream() {
        let client = test_client();
        client
            .put("test.sql", Bytes::from("select 1;"))
            .await
            .unwrap();

        let output = client.get_stream("test.sql").await.unwrap();
        assert_eq!(output.meta.size, 9);

        let chunks: Vec<Bytes> = output.stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"select 1;");
    }

    #[tokio::test]
    async fn get_stream_not_found() {
        let client = test_client();
        let err = client.get_stream("missing.sql").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn list_page_filters_by_string_prefix() {
        let client = test_client();
        for key in [
            "migrations/V1__a.sql",
            "migrations/V2__b.sql",
            "migrations_old/V0__x.sql",
            "other/R__view.sql",
        ] {
            client.put(key, Bytes::from("--")).await.unwrap();
        }

        let page = client.list_page("migrations/V", 10).await.unwrap();
        assert_eq!(
            keys(&page),
            ["migrations/V1__a.sql", "migrations/V2__b.sql"]
        );

        let page = client.list_page("migrations", 10).await.unwrap();
        assert_eq!(page.objects.len(), 3);
        assert!(!page.truncated);
    }

    #[tokio::test]
    async fn list_page_empty_prefix_lists_everything() {
        let client = test_client();
        client.put("a/one.sql", Bytes::from("1")).await.unwrap();
        client.put("two.sql", Bytes::from("2")).await.unwrap();

        let page = client.list_page("", 10).await.unwrap();
        assert_eq!(page.objects.len(), 2);
    }

    #[tokio::test]
    async fn keys_are_not_re_encoded() {
        let client = test_client();
        client
            .put("sql/V1__a#b.sql", Bytes::from("select 1;"))
            .await
            .unwrap();

        let page = client.list_page("sql/V1__a#", 10).await.unwrap();
        assert_eq!(keys(&page), ["sql/V1__a#b.sql"]);

        let output = client.get_stream("sql/V1__a#b.sql").await.unwrap();
        let chunks: Vec<Bytes> = output.stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"select 1;");
    }

    #[tokio::test]
    async fn list_page_stops_past_the_prefix() {
        let client = test_client();
        for key in ["a.sql", "migrations-x.sql", "migrations/V1.sql", "zz/V9.sql"] {
            client.put(key, Bytes::from("--")).await.unwrap();
        }

        let page = client.list_page("migrations", 10).await.unwrap();
        assert_eq!(keys(&page), ["migrations-x.sql", "migrations/V1.sql"]);
    }

    #[tokio::test]
    async fn invalid_key_is_rejected() {
        let client = test_client();
        let err = client.put("sql//V1.sql", Bytes::from("--")).await.unwrap_err();
        assert_eq!(err.kind(), crate::types::ErrorKind::Runtime);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn list_page_truncates() {
        let client = test_client();
        for i in 0..5 {
            client
                .put(&format!("dir/V{i}__step.sql"), Bytes::from(format!("{i}")))
                .await
                .unwrap();
        }

        let page = client.list_page("dir/", 3).await.unwrap();
        assert_eq!(page.objects.len(), 3);
        assert!(page.truncated);

        let page = client.list_page("dir/", 6).await.unwrap();
        assert_eq!(page.objects.len(), 5);
        assert!(!page.truncated);
    }
}
