//! Browser boundary
//!
//! The router and renderer never touch a real DOM. They talk to a
//! [`Browser`] (location and history) and a [`Document`] (mount point and
//! in-app anchors). The web crate implements both over `web-sys`;
//! [`memory`] provides headless versions for tests and the preview tool.

pub mod memory;

pub use memory::{MemoryAnchor, MemoryBrowser, MemoryDocument};

use url::Url;

use crate::error::ShellResult;

/// Location and session history
pub trait Browser {
    /// Full URL of the current location, read fresh on every call
    fn location(&self) -> ShellResult<Url>;

    /// Push a new history entry for `url` without loading it
    ///
    /// No state payload and no title. Pushing the current URL again still
    /// adds an entry.
    fn push_state(&self, url: &Url) -> ShellResult<()>;
}

/// The rendered document
pub trait Document {
    type Anchor: Anchor;

    /// Replace the whole content of the element with id `mount_id`
    fn replace_mount(&self, mount_id: &str, markup: &str) -> ShellResult<()>;

    /// Anchors currently in the document that carry `attribute`
    fn anchors(&self, attribute: &str) -> Vec<Self::Anchor>;
}

/// An in-app navigation anchor
pub trait Anchor {
    /// Raw or resolved `href`, if the anchor has one
    fn href(&self) -> Option<String>;

    /// Add or remove a class
    fn toggle_class(&self, class: &str, on: bool);
}
