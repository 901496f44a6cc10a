#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Storage backend contract and its `object_store` implementation.
pub mod backend;
pub mod client;
/// Connector trait and object storage providers.
pub mod providers;
/// Shared types (Error, ObjectSummary).
pub mod types;

#[doc(hidden)]
pub mod prelude;

pub use backend::{ByteStream, ObjectStoreBackend, StorageBackend};
pub use types::{Error, ErrorKind, ObjectSummary};

/// Tracing target for object storage operations.
pub const TRACING_TARGET: &str = "cairn_object";
