//! Connector trait and object storage providers.

mod azure;
mod connector;
mod gcs;
mod memory;
mod s3;

pub use azure::AzureConnector;
pub use connector::Connector;
pub use gcs::GcsConnector;
pub use memory::MemoryConnector;
pub use s3::S3Connector;
