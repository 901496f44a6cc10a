//! Prelude module for convenient imports.

pub use crate::encoding::TextEncoding;
pub use crate::error::{Error, Result};
pub use crate::location::{Location, Scheme};
pub use crate::resource::{RemoteTextResource, ResourceSet, TextResource, TextStream};
pub use crate::scanner::RemoteStorageScanner;
