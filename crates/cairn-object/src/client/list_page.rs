//! Result type for [`ObjectStoreClient::list_page`](super::ObjectStoreClient::list_page).

use object_store::ObjectMeta;

/// A single page of listing results.
#[derive(Debug, Default)]
pub struct ListPage {
    /// Objects whose key starts with the requested prefix.
    pub objects: Vec<ObjectMeta>,
    /// Whether the page filled up; further matches may exist.
    pub truncated: bool,
}
