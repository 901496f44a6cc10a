//! Result type for [`ObjectStoreClient::get_stream`](super::ObjectStoreClient::get_stream).

use std::fmt;

use object_store::ObjectMeta;

use crate::backend::ByteStream;

/// Result of a successful [`ObjectStoreClient::get_stream`](super::ObjectStoreClient::get_stream) call.
pub struct GetOutput {
    /// Raw bytes of the object, fetched lazily as the stream is polled.
    pub stream: ByteStream,
    /// Object metadata (size, etag, last_modified, location).
    pub meta: ObjectMeta,
}

impl fmt::Debug for GetOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetOutput")
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
