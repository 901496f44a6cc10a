//! Error type for object-store operations.

use std::fmt;

use strum::{AsRefStr, IntoStaticStr};

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Broad category of an object-store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The container or object does not exist.
    NotFound,
    /// Credentials were missing, rejected, or lack access.
    PermissionDenied,
    /// The store could not be configured or reached.
    Connection,
    /// Any other failure reported by the store.
    Runtime,
}

/// A lightweight error carrying a kind, a message, an optional source, and
/// a retryable flag.
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<BoxedError>,
    retryable: bool,
}

impl Error {
    /// Create an error of the given kind formatted as `[{label}] {msg}`.
    pub fn new(kind: ErrorKind, msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self {
            kind,
            message: format!("[{label}] {msg}"),
            source: None,
            retryable,
        }
    }

    /// Create a runtime error formatted as `[{label}] {msg}`.
    pub fn runtime(msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self::new(ErrorKind::Runtime, msg, label, retryable)
    }

    /// Create a connection error formatted as `[{label}] {msg}`.
    pub fn connection(msg: impl fmt::Display, label: &str, retryable: bool) -> Self {
        Self::new(ErrorKind::Connection, msg, label, retryable)
    }

    /// Create a not-found error formatted as `[{label}] {msg}`.
    pub fn not_found(msg: impl fmt::Display, label: &str) -> Self {
        Self::new(ErrorKind::NotFound, msg, label, false)
    }

    /// Attach a source error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The backend's diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the caller could reasonably retry this operation.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Shorthand for `kind() == ErrorKind::NotFound`.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<object_store::Error> for Error {
    fn from(err: object_store::Error) -> Self {
        let kind = match &err {
            object_store::Error::NotFound { .. } => ErrorKind::NotFound,
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => ErrorKind::PermissionDenied,
            object_store::Error::Generic { .. }
            | object_store::Error::UnknownConfigurationKey { .. } => ErrorKind::Connection,
            _ => ErrorKind::Runtime,
        };
        let retryable = !matches!(
            err,
            object_store::Error::NotFound { .. }
                | object_store::Error::PermissionDenied { .. }
                | object_store::Error::Unauthenticated { .. }
                | object_store::Error::AlreadyExists { .. }
                | object_store::Error::Precondition { .. }
        );
        Self::new(kind, &err, "object-store", retryable).with_source(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("retryable", &self.retryable)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
