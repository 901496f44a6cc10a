//! Convenience re-exports.

pub use crate::backend::{ByteStream, ObjectStoreBackend, StorageBackend};
pub use crate::client::{DEFAULT_PAGE_SIZE, GetOutput, ListPage, ObjectStoreClient};
pub use crate::providers::{AzureConnector, Connector, GcsConnector, MemoryConnector, S3Connector};
pub use crate::types::{Error, ErrorKind, ObjectSummary};
