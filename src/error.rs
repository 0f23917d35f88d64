//! Shell error types
//!
//! Errors raised by the router, the renderer and the browser adapters.
//! Producer-side failures live in [`crate::views::ViewError`] and are wrapped
//! here once they abort a render cycle.

use thiserror::Error;

use crate::views::ViewError;

/// Errors that can occur in the shell core
#[derive(Error, Debug)]
pub enum ShellError {
    /// A view producer failed; the render cycle was aborted
    #[error("View for {path} failed: {source}")]
    View {
        path: String,
        #[source]
        source: ViewError,
    },

    /// Navigation target is on a different origin than the current page
    #[error("Cross-origin navigation to {target} refused (current origin {origin})")]
    CrossOrigin { target: String, origin: String },

    /// An href or location could not be parsed as a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The mount point element is not present in the document
    #[error("Mount point #{0} not found")]
    MountPointMissing(String),

    /// The history API rejected an operation
    #[error("History error: {0}")]
    History(String),

    /// A route path does not start with `/`
    #[error("Route path must start with '/': {0:?}")]
    InvalidRoutePath(String),

    /// A route path was registered twice
    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),
}

/// Result type alias for shell operations
pub type ShellResult<T> = Result<T, ShellError>;
