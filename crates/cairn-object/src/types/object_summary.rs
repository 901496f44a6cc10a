//! Minimal metadata describing a listed object.

use derive_more::Display;

/// Container and key of an object returned by a listing, without its
/// content.
///
/// Displays as `{container}/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{container}/{key}")]
pub struct ObjectSummary {
    container: String,
    key: String,
    size: Option<u64>,
}

impl ObjectSummary {
    /// Create a summary for `key` inside `container`.
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
            size: None,
        }
    }

    /// Attach the object size reported by the listing.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Name of the container (bucket) holding the object.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Full key of the object, including any prefix.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Object size in bytes, if the backend reported one.
    pub fn size(&self) -> Option<u64> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_container_and_key() {
        let summary = ObjectSummary::new("bucket", "migrations/V1__init.sql").with_size(12);
        assert_eq!(summary.to_string(), "bucket/migrations/V1__init.sql");
        assert_eq!(summary.size(), Some(12));
    }
}
