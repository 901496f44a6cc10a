//! Shared types for backends and their callers.

pub mod error;
pub mod object_summary;

pub use error::{Error, ErrorKind};
pub use object_summary::ObjectSummary;
