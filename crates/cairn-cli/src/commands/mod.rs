//! Command implementations.
//!
//! Each command is split into discovery, which needs a backend per
//! provider, and rendering, which writes to any [`AsyncWrite`] sink.
//!
//! [`AsyncWrite`]: tokio::io::AsyncWrite

mod read;
mod scan;

use std::collections::HashMap;
use std::sync::Arc;

use cairn_object::StorageBackend;
use cairn_resource::{Location, RemoteStorageScanner, ResourceSet};
pub use read::read;
pub use scan::scan;

use crate::config::{Provider, StorageConfig};

/// Tracing target for command execution.
const TRACING_TARGET: &str = "cairn_cli::commands";

/// Scans every location in order and merges the results.
///
/// `backend_for` is called once per provider in use. Locations that cannot
/// be listed contribute nothing; the scanner has already logged why.
async fn discover<F>(
    config: &StorageConfig,
    backend_for: F,
    locations: &[Location],
) -> ResourceSet
where
    F: Fn(Provider) -> Arc<dyn StorageBackend>,
{
    let dispatch = tracing::dispatcher::get_default(|dispatch| dispatch.clone());
    let mut scanners: HashMap<Provider, RemoteStorageScanner> = HashMap::new();
    let mut resources = ResourceSet::new();

    for location in locations {
        let provider = config.provider_for(location);
        let scanner = scanners.entry(provider).or_insert_with(|| {
            RemoteStorageScanner::new(backend_for(provider), config.encoding)
                .with_dispatch(dispatch.clone())
        });

        let found = scanner.scan_for_resources(location).await;
        tracing::info!(
            target: TRACING_TARGET,
            %location,
            ?provider,
            count = found.len(),
            "location scanned"
        );
        resources.extend_from(found);
    }

    resources
}
