//! Text resources and their ordered collections.

mod remote;
mod set;
mod stream;

pub use remote::RemoteTextResource;
pub use set::ResourceSet;
pub use stream::TextStream;

use crate::error::Result;

/// Anything that can be loaded as a text resource.
///
/// Callers hold this trait rather than a concrete type, so local and
/// remote resources can be sorted, displayed and read uniformly. The
/// absolute path is the resource's identity.
#[async_trait::async_trait]
pub trait TextResource: Send + Sync {
    /// Opens the content as a stream of decoded text.
    ///
    /// Every call performs a fresh fetch; nothing is cached.
    async fn read(&self) -> Result<TextStream>;

    /// Full path identifying the resource, used for ordering and display.
    fn absolute_path(&self) -> &str;

    /// Path of the resource on the local disk, or the absolute path when
    /// there is no separate on-disk location.
    fn absolute_path_on_disk(&self) -> &str;

    /// Final path segment.
    fn filename(&self) -> &str;

    /// Path relative to the scanned location.
    fn relative_path(&self) -> &str;
}
