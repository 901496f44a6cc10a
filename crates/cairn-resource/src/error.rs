//! Error types for resource discovery and reading.

use crate::encoding::TextEncoding;

/// Result type for resource operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while locating or reading resources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetching the content of an already identified object failed.
    #[error("failed to get object {path} from storage: {source}")]
    StorageAccess {
        /// Absolute path (`container/key`) of the object.
        path: String,
        /// The backend's diagnostic.
        source: cairn_object::Error,
    },

    /// Object content was not valid in the configured encoding.
    #[error("malformed {encoding} input in {path} at byte {offset}")]
    Decode {
        /// Absolute path (`container/key`) of the object.
        path: String,
        /// Encoding used for decoding.
        encoding: TextEncoding,
        /// Byte offset of the first invalid sequence.
        offset: u64,
    },

    /// The location descriptor is not of the form `[scheme:]container/prefix`.
    #[error("invalid location '{location}': {reason}")]
    InvalidLocation {
        /// The rejected descriptor.
        location: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The requested text encoding is not supported.
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
}

impl Error {
    /// Creates a new storage access error.
    pub fn storage_access(path: impl Into<String>, source: cairn_object::Error) -> Self {
        Self::StorageAccess {
            path: path.into(),
            source,
        }
    }

    /// Creates a new invalid location error.
    pub fn invalid_location(location: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            reason,
        }
    }

    /// Whether this error came from the storage backend.
    pub fn is_storage_access(&self) -> bool {
        matches!(self, Self::StorageAccess { .. })
    }
}
