//! Route table
//!
//! Exact-match mapping from path to view producer, with a designated
//! fallback for every path that is not registered. Built once, never mutated.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{ShellError, ShellResult};
use crate::views::View;

/// How a path was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    /// The path is registered
    Registered,
    /// The path is unknown; the not-found producer handles it
    NotFound,
}

/// Immutable path → producer table
pub struct RouteTable {
    routes: HashMap<String, Rc<dyn View>>,
    not_found: Rc<dyn View>,
}

impl RouteTable {
    /// Start building a table with the given fallback producer
    pub fn builder(not_found: impl View + 'static) -> RouteTableBuilder {
        RouteTableBuilder {
            routes: Vec::new(),
            not_found: Rc::new(not_found),
        }
    }

    /// Resolve a path to its producer, falling back to not-found
    pub fn resolve(&self, path: &str) -> (RouteMatch, Rc<dyn View>) {
        match self.routes.get(path) {
            Some(view) => (RouteMatch::Registered, Rc::clone(view)),
            None => (RouteMatch::NotFound, Rc::clone(&self.not_found)),
        }
    }

    /// Whether `path` is registered
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Number of registered paths (the fallback is not counted)
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("paths", &self.paths())
            .finish_non_exhaustive()
    }
}

/// Collects routes and validates them on [`build`](Self::build)
pub struct RouteTableBuilder {
    routes: Vec<(String, Rc<dyn View>)>,
    not_found: Rc<dyn View>,
}

impl RouteTableBuilder {
    /// Register a producer for an exact path
    pub fn route(mut self, path: impl Into<String>, view: impl View + 'static) -> Self {
        self.routes.push((path.into(), Rc::new(view)));
        self
    }

    /// Validate and freeze the table
    ///
    /// Every path must start with `/` and appear only once.
    pub fn build(self) -> ShellResult<RouteTable> {
        let mut routes = HashMap::with_capacity(self.routes.len());

        for (path, view) in self.routes {
            if !path.starts_with('/') {
                return Err(ShellError::InvalidRoutePath(path));
            }
            if routes.contains_key(&path) {
                return Err(ShellError::DuplicateRoute(path));
            }
            routes.insert(path, view);
        }

        tracing::debug!(routes = routes.len(), "Route table built");

        Ok(RouteTable {
            routes,
            not_found: self.not_found,
        })
    }
}
