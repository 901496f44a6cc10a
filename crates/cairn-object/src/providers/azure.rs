//! Azure Blob Storage connector using [`object_store::azure::MicrosoftAzureBuilder`].

use object_store::azure::MicrosoftAzureBuilder;

use super::Connector;
use crate::client::ObjectStoreClient;
use crate::types::Error;

/// Opens Azure Blob clients with the account and credentials taken from
/// the `AZURE_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct AzureConnector {
    endpoint: Option<String>,
    allow_http: bool,
}

impl AzureConnector {
    /// Creates a connector relying entirely on the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom endpoint URL (for Azure Stack or Azurite).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Permits plain HTTP connections.
    pub fn with_allow_http(mut self, allow_http: bool) -> Self {
        self.allow_http = allow_http;
        self
    }
}

impl Connector for AzureConnector {
    const ID: &'static str = "azure";

    fn connect(&self, container: &str) -> Result<ObjectStoreClient, Error> {
        let mut builder = MicrosoftAzureBuilder::from_env().with_container_name(container);

        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint.clone());
        }

        if self.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder
            .build()
            .map_err(|e| Error::connection(&e, Self::ID, true).with_source(e))?;

        Ok(ObjectStoreClient::new(store))
    }
}
