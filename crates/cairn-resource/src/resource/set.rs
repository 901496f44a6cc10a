//! Ordered, duplicate-free resource collection.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::{RemoteTextResource, TextResource};

/// Resources keyed and ordered by absolute path.
///
/// Inserting a resource whose path is already present keeps the first one.
#[derive(Debug, Clone)]
pub struct ResourceSet<R = RemoteTextResource> {
    resources: BTreeMap<String, R>,
}

impl<R> Default for ResourceSet<R> {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }
}

impl<R: TextResource> ResourceSet<R> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `resource`; returns `false` if its path was already present.
    pub fn insert(&mut self, resource: R) -> bool {
        match self.resources.entry(resource.absolute_path().to_owned()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(resource);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Looks up a resource by absolute path.
    pub fn get(&self, absolute_path: &str) -> Option<&R> {
        self.resources.get(absolute_path)
    }

    /// Whether a resource with this absolute path is present.
    pub fn contains(&self, absolute_path: &str) -> bool {
        self.resources.contains_key(absolute_path)
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources in ascending path order.
    pub fn iter(&self) -> btree_map::Values<'_, String, R> {
        self.resources.values()
    }

    /// Absolute paths in ascending order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Moves every resource of `other` into this set, keeping existing
    /// entries on conflict.
    pub fn extend_from(&mut self, other: Self) {
        for resource in other {
            self.insert(resource);
        }
    }
}

impl<R: TextResource> FromIterator<R> for ResourceSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut set = Self::new();
        for resource in iter {
            set.insert(resource);
        }
        set
    }
}

impl<R> IntoIterator for ResourceSet<R> {
    type IntoIter = btree_map::IntoValues<String, R>;
    type Item = R;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_values()
    }
}

impl<'a, R> IntoIterator for &'a ResourceSet<R> {
    type IntoIter = btree_map::Values<'a, String, R>;
    type Item = &'a R;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.values()
    }
}
