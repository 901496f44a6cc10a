//! S3-compatible connector using [`object_store::aws::AmazonS3Builder`].
//!
//! Works with AWS S3, MinIO, and any S3-compatible service.

use object_store::aws::AmazonS3Builder;

use super::Connector;
use crate::client::ObjectStoreClient;
use crate::types::Error;

/// Opens S3 clients with credentials and region taken from the `AWS_*`
/// environment variables, optionally overridden here.
#[derive(Debug, Clone, Default)]
pub struct S3Connector {
    region: Option<String>,
    endpoint: Option<String>,
    allow_http: bool,
}

impl S3Connector {
    /// Creates a connector relying entirely on the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets a custom endpoint (e.g. `http://localhost:9000` for MinIO).
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

impl Connector for S3Connector {
    const ID: &'static str = "s3";

    fn connect(&self, container: &str) -> Result<ObjectStoreClient, Error> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(container);

        if let Some(region) = &self.region {
            builder = builder.with_region(region);
        }

        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint);
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
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
