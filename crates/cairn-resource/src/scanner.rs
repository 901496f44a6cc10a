//! Discovery of resources under a remote storage location.

use std::fmt;
use std::sync::Arc;

use cairn_object::StorageBackend;
use tracing::Dispatch;

use crate::TRACING_TARGET;
use crate::encoding::TextEncoding;
use crate::location::Location;
use crate::resource::{RemoteTextResource, ResourceSet, TextResource};

/// Turns a [`Location`] into the set of objects stored under it.
///
/// A scanner is configured once and may be shared between tasks; it keeps
/// no state between scans. Log events go to the injected [`Dispatch`] when
/// one is set, otherwise to the current default subscriber.
#[derive(Clone)]
pub struct RemoteStorageScanner {
    backend: Arc<dyn StorageBackend>,
    encoding: TextEncoding,
    dispatch: Option<Dispatch>,
}

impl RemoteStorageScanner {
    /// Creates a scanner whose resources decode with `encoding`.
    pub fn new(backend: Arc<dyn StorageBackend>, encoding: TextEncoding) -> Self {
        Self {
            backend,
            encoding,
            dispatch: None,
        }
    }

    /// Routes this scanner's log events to `dispatch`.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Encoding given to every discovered resource.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Lists `location` once and wraps every object found.
    ///
    /// Only the first listing page is used. When the location cannot be
    /// listed a warning is logged and the result is empty, so one
    /// unreachable location does not stop discovery elsewhere.
    pub async fn scan_for_resources(&self, location: &Location) -> ResourceSet {
        let container = location.container();
        let prefix = location.prefix();

        let summaries = match self.backend.list(container, prefix).await {
            Ok(summaries) => summaries,
            Err(error) => {
                self.emit(|| {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        %location,
                        %error,
                        "skipping location"
                    );
                });
                return ResourceSet::new();
            }
        };

        let mut resources = ResourceSet::new();
        for summary in summaries {
            let resource =
                RemoteTextResource::new(summary, self.encoding, Arc::clone(&self.backend));
            self.emit(|| {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path = resource.absolute_path(),
                    "found remote resource"
                );
            });
            resources.insert(resource);
        }

        self.emit(|| {
            tracing::debug!(
                target: TRACING_TARGET,
                %location,
                count = resources.len(),
                "scanned location"
            );
        });

        resources
    }

    fn emit(&self, event: impl FnOnce()) {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, event),
            None => event(),
        }
    }
}

impl fmt::Debug for RemoteStorageScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStorageScanner")
            .field("encoding", &self.encoding)
            .field("dispatch", &self.dispatch.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use cairn_object::providers::MemoryConnector;
    use cairn_object::{ByteStream, ObjectStoreBackend, ObjectSummary};

    use super::*;
    use crate::test_support::capturing_dispatch;

    /// Backend whose listing always fails and whose fetches are never reached.
    struct UnreachableBackend;

    #[async_trait::async_trait]
    impl StorageBackend for UnreachableBackend {
        async fn list(
            &self,
            container: &str,
            _prefix: Option<&str>,
        ) -> Result<Vec<ObjectSummary>, cairn_object::Error> {
            Err(cairn_object::Error::connection(
                format!("unable to resolve region for {container}"),
                "test",
                true,
            ))
        }

        async fn get(&self, _: &str, _: &str) -> Result<ByteStream, cairn_object::Error> {
            unreachable!("nothing is listed")
        }
    }

    /// Backend returning the same summary twice.
    struct DuplicatingBackend;

    #[async_trait::async_trait]
    impl StorageBackend for DuplicatingBackend {
        async fn list(
            &self,
            container: &str,
            _prefix: Option<&str>,
        ) -> Result<Vec<ObjectSummary>, cairn_object::Error> {
            let summary = ObjectSummary::new(container, "sql/V1__a.sql");
            Ok(vec![summary.clone(), summary])
        }

        async fn get(&self, _: &str, _: &str) -> Result<ByteStream, cairn_object::Error> {
            unreachable!("resources are not read")
        }
    }

    async fn seeded_backend(keys: &[&str]) -> Arc<dyn StorageBackend> {
        let connector = MemoryConnector::new();
        let bucket = connector.create_container("bucket");
        for key in keys {
            bucket.put(key, Bytes::from_static(b"--")).await.unwrap();
        }
        Arc::new(ObjectStoreBackend::new(connector))
    }

    #[tokio::test]
    async fn scan_returns_sorted_resources() {
        let backend = seeded_backend(&[
            "migrations/V2__b.sql",
            "migrations/V1__a.sql",
            "seeds/R__data.sql",
        ])
        .await;
        let scanner = RemoteStorageScanner::new(backend, TextEncoding::Utf8);

        let location = Location::parse("bucket/migrations").unwrap();
        let resources = scanner.scan_for_resources(&location).await;

        let names: Vec<_> = resources.iter().map(TextResource::filename).collect();
        assert_eq!(names, ["V1__a.sql", "V2__b.sql"]);
        let paths: Vec<_> = resources.paths().collect();
        assert_eq!(
            paths,
            ["bucket/migrations/V1__a.sql", "bucket/migrations/V2__b.sql"]
        );
    }

    #[tokio::test]
    async fn scan_whole_container() {
        let backend = seeded_backend(&["a.sql", "dir/b.sql"]).await;
        let scanner = RemoteStorageScanner::new(backend, TextEncoding::Utf8);

        let location = Location::parse("bucket/").unwrap();
        assert_eq!(scanner.scan_for_resources(&location).await.len(), 2);
    }

    #[tokio::test]
    async fn resources_carry_scanner_encoding() {
        let backend = seeded_backend(&["sql/V1__a.sql"]).await;
        let scanner = RemoteStorageScanner::new(backend, TextEncoding::Latin1);

        let location = Location::parse("bucket/sql").unwrap();
        let resources = scanner.scan_for_resources(&location).await;
        assert!(resources.iter().all(|r| r.encoding() == TextEncoding::Latin1));
    }

    #[tokio::test]
    async fn duplicate_summaries_collapse() {
        let scanner = RemoteStorageScanner::new(Arc::new(DuplicatingBackend), TextEncoding::Utf8);

        let location = Location::parse("bucket/sql").unwrap();
        let resources = scanner.scan_for_resources(&location).await;
        assert_eq!(resources.len(), 1);
    }

    #[tokio::test]
    async fn list_failure_yields_empty_set_and_warns() {
        let (dispatch, logs) = capturing_dispatch();
        let scanner = RemoteStorageScanner::new(Arc::new(UnreachableBackend), TextEncoding::Utf8)
            .with_dispatch(dispatch);

        let location = Location::parse("s3:bucket/migrations").unwrap();
        let resources = scanner.scan_for_resources(&location).await;
        assert!(resources.is_empty());

        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("s3:bucket/migrations"), "{output}");
        assert!(output.contains("unable to resolve region for bucket"), "{output}");
    }

    #[tokio::test]
    async fn discovered_resources_are_logged_through_dispatch() {
        let (dispatch, logs) = capturing_dispatch();
        let backend = seeded_backend(&["sql/V1__a.sql"]).await;
        let scanner = RemoteStorageScanner::new(backend, TextEncoding::Utf8).with_dispatch(dispatch);

        let location = Location::parse("bucket/sql").unwrap();
        scanner.scan_for_resources(&location).await;

        let output = logs.contents();
        assert!(output.contains("found remote resource"), "{output}");
        assert!(output.contains("bucket/sql/V1__a.sql"), "{output}");
    }

    #[tokio::test]
    async fn unknown_container_is_skipped() {
        let backend = seeded_backend(&["sql/V1__a.sql"]).await;
        let scanner = RemoteStorageScanner::new(backend, TextEncoding::Utf8);

        let location = Location::parse("other-bucket/sql").unwrap();
        assert!(scanner.scan_for_resources(&location).await.is_empty());
    }
}
