//! Connector trait for opening per-container clients.

use crate::client::ObjectStoreClient;
use crate::types::Error;

/// Factory for clients scoped to a single container (bucket).
///
/// Implementations own provider settings such as endpoints and regions;
/// credentials are left to the provider's own discovery chain. Each call
/// builds a new client, so no connection state is shared between calls.
pub trait Connector: Send + Sync + 'static {
    /// Unique identifier (e.g. "s3", "memory").
    const ID: &'static str;

    /// Create a client for `container`.
    fn connect(&self, container: &str) -> Result<ObjectStoreClient, Error>;
}
