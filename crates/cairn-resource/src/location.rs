//! Location descriptors of the form `[scheme:]container/prefix`.

use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString};

use crate::error::{Error, Result};

/// Storage provider named by a location's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scheme {
    /// Amazon S3 and S3-compatible stores.
    S3,
    /// Google Cloud Storage.
    Gcs,
    /// Azure Blob Storage.
    Azure,
}

/// Where to look for resources: a container and an optional key prefix.
///
/// The container is everything before the first `/` of the path and must
/// not be empty. The prefix is the remainder with leading `/` removed; an
/// empty remainder means the whole container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    scheme: Option<Scheme>,
    path: String,
    separator: usize,
}

impl Location {
    /// Parses a descriptor such as `s3:bucket/migrations` or `bucket/`.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let (scheme, path) = match descriptor.split_once(':') {
            Some((scheme, path)) if !scheme.contains('/') => {
                let scheme = Scheme::from_str(scheme)
                    .map_err(|_| Error::invalid_location(descriptor, "unsupported scheme"))?;
                (Some(scheme), path)
            }
            _ => (None, descriptor),
        };

        let separator = path.find('/').ok_or_else(|| {
            Error::invalid_location(descriptor, "expected <container>/<prefix>")
        })?;

        if separator == 0 {
            return Err(Error::invalid_location(descriptor, "container name is empty"));
        }

        Ok(Self {
            scheme,
            path: path.to_owned(),
            separator,
        })
    }

    /// Scheme given in the descriptor, if any.
    pub fn scheme(&self) -> Option<Scheme> {
        self.scheme
    }

    /// The descriptor without its scheme.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Container (bucket) name.
    pub fn container(&self) -> &str {
        &self.path[..self.separator]
    }

    /// Key prefix, or `None` to list the whole container.
    pub fn prefix(&self) -> Option<&str> {
        let prefix = self.path[self.separator..].trim_start_matches('/');
        (!prefix.is_empty()).then_some(prefix)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Some(scheme) => write!(f, "{scheme}:{}", self.path),
            None => f.write_str(&self.path),
        }
    }
}
