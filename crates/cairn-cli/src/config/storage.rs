//! Storage provider configuration.

use std::sync::Arc;

use anyhow::Context;
use cairn_object::client::DEFAULT_PAGE_SIZE;
use cairn_object::providers::{AzureConnector, GcsConnector, S3Connector};
use cairn_object::{ObjectStoreBackend, StorageBackend};
use cairn_resource::{Location, Scheme, TextEncoding};
use clap::{Args, ValueEnum};

use crate::TRACING_TARGET_CONFIG;

/// Object storage provider used when a location has no scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Provider {
    /// Amazon S3 or an S3-compatible service.
    S3,
    /// Google Cloud Storage.
    Gcs,
    /// Azure Blob Storage.
    Azure,
}

impl From<Scheme> for Provider {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::S3 => Self::S3,
            Scheme::Gcs => Self::Gcs,
            Scheme::Azure => Self::Azure,
        }
    }
}

/// Storage access configuration.
///
/// Credentials are never passed here; each provider reads them from its
/// standard environment variables.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Provider for locations without a `s3:`, `gcs:` or `azure:` scheme.
    #[arg(long, env = "CAIRN_PROVIDER", value_enum, default_value_t = Provider::S3)]
    pub provider: Provider,

    /// Custom endpoint URL (e.g. MinIO or Azurite).
    #[arg(long, env = "CAIRN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Region override for S3.
    #[arg(long, env = "CAIRN_REGION")]
    pub region: Option<String>,

    /// Allow plain HTTP connections to the endpoint.
    #[arg(long, env = "CAIRN_ALLOW_HTTP")]
    pub allow_http: bool,

    /// Path to a GCS service account key file.
    #[arg(long, env = "CAIRN_GCS_SERVICE_ACCOUNT_KEY")]
    pub service_account_key: Option<String>,

    /// Text encoding of the scripts.
    #[arg(long, env = "CAIRN_ENCODING", default_value = "UTF-8", value_parser = parse_encoding)]
    pub encoding: TextEncoding,

    /// Maximum number of objects taken from a single listing.
    #[arg(long, env = "CAIRN_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

impl StorageConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page size must be at least 1");
        }

        if let Some(ref endpoint) = self.endpoint
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            anyhow::bail!("endpoint '{endpoint}' must start with http:// or https://");
        }

        Ok(())
    }

    /// Logs configuration at info level (no credentials are held here).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            provider = ?self.provider,
            endpoint = ?self.endpoint,
            region = ?self.region,
            allow_http = self.allow_http,
            encoding = %self.encoding,
            page_size = self.page_size,
            "Storage configuration"
        );
    }

    /// Provider serving `location`: its scheme, or the configured default.
    pub fn provider_for(&self, location: &Location) -> Provider {
        location.scheme().map_or(self.provider, Provider::from)
    }

    /// Builds the backend for `provider`.
    pub fn backend(&self, provider: Provider) -> Arc<dyn StorageBackend> {
        match provider {
            Provider::S3 => {
                let mut connector = S3Connector::new().with_allow_http(self.allow_http);
                if let Some(ref region) = self.region {
                    connector = connector.with_region(region);
                }
                if let Some(ref endpoint) = self.endpoint {
                    connector = connector.with_endpoint(endpoint);
                }
                self.wrap(connector)
            }
            Provider::Gcs => {
                let mut connector = GcsConnector::new();
                if let Some(ref key) = self.service_account_key {
                    connector = connector.with_service_account_key(key);
                }
                self.wrap(connector)
            }
            Provider::Azure => {
                let mut connector = AzureConnector::new().with_allow_http(self.allow_http);
                if let Some(ref endpoint) = self.endpoint {
                    connector = connector.with_endpoint(endpoint);
                }
                self.wrap(connector)
            }
        }
    }

    fn wrap<C: cairn_object::providers::Connector>(&self, connector: C) -> Arc<dyn StorageBackend> {
        Arc::new(ObjectStoreBackend::new(connector).with_page_size(self.page_size))
    }
}

/// Parses every location argument up front so typos fail before any I/O.
pub fn parse_locations(descriptors: &[String]) -> anyhow::Result<Vec<Location>> {
    descriptors
        .iter()
        .map(|d| Location::parse(d).with_context(|| format!("invalid location argument '{d}'")))
        .collect()
}

fn parse_encoding(name: &str) -> Result<TextEncoding, String> {
    TextEncoding::from_name(name).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[clap(flatten)]
        storage: StorageConfig,
    }

    #[test]
    fn defaults() {
        let cli = TestCli::try_parse_from(["cairn"]).unwrap();
        assert_eq!(cli.storage.provider, Provider::S3);
        assert_eq!(cli.storage.encoding, TextEncoding::Utf8);
        assert_eq!(cli.storage.page_size, DEFAULT_PAGE_SIZE);
        assert!(cli.storage.validate().is_ok());
    }

    #[test]
    fn parses_encoding_names() {
        let cli = TestCli::try_parse_from(["cairn", "--encoding", "latin1"]).unwrap();
        assert_eq!(cli.storage.encoding, TextEncoding::Latin1);

        assert!(TestCli::try_parse_from(["cairn", "--encoding", "klingon"]).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cli = TestCli::try_parse_from(["cairn", "--page-size", "0"]).unwrap();
        assert!(cli.storage.validate().is_err());

        cli.storage.page_size = 10;
        cli.storage.endpoint = Some("localhost:9000".to_owned());
        assert!(cli.storage.validate().is_err());

        cli.storage.endpoint = Some("http://localhost:9000".to_owned());
        assert!(cli.storage.validate().is_ok());
    }

    #[test]
    fn scheme_overrides_default_provider() {
        let cli = TestCli::try_parse_from(["cairn", "--provider", "azure"]).unwrap();
        let locations = parse_locations(&["gcs:bucket/sql".to_owned(), "bucket/sql".to_owned()])
            .unwrap();

        assert_eq!(cli.storage.provider_for(&locations[0]), Provider::Gcs);
        assert_eq!(cli.storage.provider_for(&locations[1]), Provider::Azure);
    }

    #[test]
    fn invalid_location_names_the_argument() {
        let err = parse_locations(&["no-separator".to_owned()]).unwrap_err();
        assert!(err.to_string().contains("no-separator"));
    }
}
