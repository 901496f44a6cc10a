//! In-process connector backed by [`object_store::memory::InMemory`].

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use object_store::memory::InMemory;

use super::Connector;
use crate::client::ObjectStoreClient;
use crate::types::Error;

/// Named in-memory containers, shared between clones.
///
/// Connecting to a container that was never created fails, which makes
/// this connector usable for exercising unreachable-location paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    containers: Arc<RwLock<HashMap<String, ObjectStoreClient>>>,
}

impl MemoryConnector {
    /// Creates a connector with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a client for `name`, creating an empty container if needed.
    pub fn create_container(&self, name: &str) -> ObjectStoreClient {
        let mut containers = self
            .containers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        containers
            .entry(name.to_owned())
            .or_insert_with(|| ObjectStoreClient::new(InMemory::new()))
            .clone()
    }

    /// Drops the container `name` and everything stored in it.
    pub fn remove_container(&self, name: &str) -> bool {
        self.containers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }
}

impl Connector for MemoryConnector {
    const ID: &'static str = "memory";

    fn connect(&self, container: &str) -> Result<ObjectStoreClient, Error> {
        self.containers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(container)
            .cloned()
            .ok_or_else(|| {
                Error::connection(
                    format!("container '{container}' is unreachable"),
                    Self::ID,
                    false,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_requires_existing_container() {
        let connector = MemoryConnector::new();
        assert!(connector.connect("bucket").is_err());

        connector.create_container("bucket");
        assert!(connector.connect("bucket").is_ok());

        assert!(connector.remove_container("bucket"));
        assert!(connector.connect("bucket").is_err());
    }

    #[test]
    fn clones_share_containers() {
        let connector = MemoryConnector::new();
        let clone = connector.clone();
        connector.create_container("shared");
        assert!(clone.connect("shared").is_ok());
    }
}
