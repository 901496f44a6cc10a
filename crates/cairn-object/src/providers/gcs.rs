//! Google Cloud Storage connector using [`object_store::gcp::GoogleCloudStorageBuilder`].

use object_store::gcp::GoogleCloudStorageBuilder;

use super::Connector;
use crate::client::ObjectStoreClient;
use crate::types::Error;

/// Opens GCS clients with credentials taken from the `GOOGLE_*`
/// environment variables or the given service account key file.
#[derive(Debug, Clone, Default)]
pub struct GcsConnector {
    service_account_key: Option<String>,
}

impl GcsConnector {
    /// Creates a connector relying entirely on the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to a JSON service account key file.
    pub fn with_service_account_key(mut self, path: impl Into<String>) -> Self {
        self.service_account_key = Some(path.into());
        self
    }
}

impl Connector for GcsConnector {
    const ID: &'static str = "gcs";

    fn connect(&self, container: &str) -> Result<ObjectStoreClient, Error> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(container);

        if let Some(key_path) = &self.service_account_key {
            builder = builder.with_service_account_path(key_path);
        }

        let store = builder
            .build()
            .map_err(|e| Error::connection(&e, Self::ID, true).with_source(e))?;

        Ok(ObjectStoreClient::new(store))
    }
}
