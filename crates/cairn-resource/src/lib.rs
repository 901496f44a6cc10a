#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Text encodings and incremental decoding.
pub mod encoding;
mod error;
mod location;
/// Text resources and resource sets.
pub mod resource;
mod scanner;
#[cfg(test)]
mod test_support;

#[doc(hidden)]
pub mod prelude;

pub use encoding::TextEncoding;
pub use error::{Error, Result};
pub use location::{Location, Scheme};
pub use resource::{RemoteTextResource, ResourceSet, TextResource, TextStream};
pub use scanner::RemoteStorageScanner;

/// Tracing target for resource discovery.
pub const TRACING_TARGET: &str = "cairn_resource";
