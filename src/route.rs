//! The route table: an ordered sequence of path → view bindings.

use crate::view::View;
use std::{collections::HashSet, fmt, sync::Arc};
use thiserror::Error;

/// A single route binding: when the current location matches `path`, the router
/// mounts `view`. `name` identifies the route for programmatic navigation, so
/// call sites do not hard-code path strings.
#[derive(Clone)]
pub struct RouteDescriptor {
    /// Exact-match URL path, e.g. `"/student"`.
    pub path: String,
    /// Symbolic identifier, unique within the table.
    pub name: String,
    /// The page to render when this route is active.
    pub view: Arc<dyn View>,
}

impl RouteDescriptor {
    /// Creates a new route binding.
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: Arc<dyn View>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("path", &self.path)
            .field("name", &self.name)
            .finish()
    }
}

/// The error type for route table construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// Two entries share the same symbolic name.
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    /// Two entries match the same location.
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),
}

/// An ordered, immutable sequence of [`RouteDescriptor`]s.
///
/// The table is built once at application start-up and handed to the
/// [`Router`](crate::Router); there is no mutation API. Resolution is exact-match,
/// first match in table order.
#[derive(Clone, Debug)]
pub struct RouteTable {
    entries: Vec<RouteDescriptor>,
}

impl RouteTable {
    /// Builds a table from the given entries, validating that every `name` and every
    /// `path` is unique.
    pub fn new(entries: Vec<RouteDescriptor>) -> Result<Self, RouteTableError> {
        let mut names = HashSet::new();
        let mut paths = HashSet::new();
        for entry in &entries {
            if !names.insert(entry.name.as_str()) {
                return Err(RouteTableError::DuplicateName(entry.name.clone()));
            }
            if !paths.insert(entry.path.as_str()) {
                return Err(RouteTableError::DuplicatePath(entry.path.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the first entry whose `path` matches the given location exactly, or
    /// `None` when nothing matches. The table has no catch-all entry.
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Returns the entry with the given symbolic name.
    pub fn get(&self, name: &str) -> Option<&RouteDescriptor> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The entries in table order.
    pub fn entries(&self) -> &[RouteDescriptor] {
        &self.entries
    }

    /// The number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, RouteDescriptor> {
        self.entries.iter()
    }
}
