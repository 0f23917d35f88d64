//! Headless browser
//!
//! In-memory [`Browser`] and [`Document`] used by the test suite and the
//! preview tool. History follows browser semantics: a push drops any forward
//! entries, back/forward only move the cursor. The document keeps the mount
//! markup as a string and re-scans it for anchors after every replacement,
//! so anchor state never survives a render, just like freshly injected DOM.

use regex::Regex;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::LazyLock;
use url::Url;

use super::{Anchor, Browser, Document};
use crate::error::{ShellError, ShellResult};

static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>").expect("anchor pattern"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern")
});

/// In-memory location and history stack
#[derive(Debug)]
pub struct MemoryBrowser {
    entries: RefCell<Vec<Url>>,
    index: Cell<usize>,
}

impl MemoryBrowser {
    /// Start a session at `start`
    pub fn new(start: &str) -> ShellResult<Self> {
        Ok(Self {
            entries: RefCell::new(vec![Url::parse(start)?]),
            index: Cell::new(0),
        })
    }

    /// Move one entry back, as the browser's back button does
    ///
    /// Returns `false` at the start of the session. The caller is expected to
    /// deliver a pop-state event afterwards.
    pub fn back(&self) -> bool {
        let index = self.index.get();
        if index == 0 {
            return false;
        }
        self.index.set(index - 1);
        true
    }

    /// Move one entry forward
    pub fn forward(&self) -> bool {
        let index = self.index.get();
        if index + 1 >= self.entries.borrow().len() {
            return false;
        }
        self.index.set(index + 1);
        true
    }

    /// Number of entries in the session history
    pub fn history_len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// All history entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().iter().map(Url::to_string).collect()
    }

    /// Path of the current entry
    pub fn pathname(&self) -> String {
        self.entries.borrow()[self.index.get()].path().to_string()
    }
}

impl Browser for MemoryBrowser {
    fn location(&self) -> ShellResult<Url> {
        Ok(self.entries.borrow()[self.index.get()].clone())
    }

    fn push_state(&self, url: &Url) -> ShellResult<()> {
        let mut entries = self.entries.borrow_mut();
        let index = self.index.get();
        entries.truncate(index + 1);
        entries.push(url.clone());
        self.index.set(index + 1);
        Ok(())
    }
}

/// An anchor parsed from markup
#[derive(Debug)]
pub struct MemoryAnchor {
    attributes: BTreeMap<String, Option<String>>,
    classes: RefCell<Vec<String>>,
}

impl MemoryAnchor {
    fn parse(attrs: &str) -> Self {
        let mut attributes = BTreeMap::new();
        for caps in ATTRIBUTE.captures_iter(attrs) {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());
            attributes.entry(name).or_insert(value);
        }

        let classes = attributes
            .get("class")
            .and_then(|v| v.as_deref())
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            attributes,
            classes: RefCell::new(classes),
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_ascii_lowercase())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }
}

impl Anchor for Rc<MemoryAnchor> {
    fn href(&self) -> Option<String> {
        self.attributes.get("href").cloned().flatten()
    }

    fn toggle_class(&self, class: &str, on: bool) {
        let mut classes = self.classes.borrow_mut();
        let present = classes.iter().position(|c| c == class);
        match (on, present) {
            (true, None) => classes.push(class.to_string()),
            (false, Some(i)) => {
                classes.remove(i);
            }
            _ => {}
        }
    }
}

fn scan_anchors(markup: &str) -> Vec<Rc<MemoryAnchor>> {
    ANCHOR_TAG
        .captures_iter(markup)
        .map(|caps| Rc::new(MemoryAnchor::parse(&caps[1])))
        .collect()
}

/// In-memory document with one mount point and optional static chrome
///
/// Chrome is markup outside the mount point (a navigation bar, say). Its
/// anchors live for the whole session; mount anchors are replaced on every
/// render.
#[derive(Debug)]
pub struct MemoryDocument {
    mount_id: String,
    chrome: Vec<Rc<MemoryAnchor>>,
    mount: RefCell<String>,
    mount_anchors: RefCell<Vec<Rc<MemoryAnchor>>>,
    replacements: Cell<usize>,
}

impl MemoryDocument {
    /// Empty document with a mount element `mount_id`
    pub fn new(mount_id: &str) -> Self {
        Self {
            mount_id: mount_id.to_string(),
            chrome: Vec::new(),
            mount: RefCell::new(String::new()),
            mount_anchors: RefCell::new(Vec::new()),
            replacements: Cell::new(0),
        }
    }

    /// Add static markup outside the mount point
    pub fn with_chrome(mut self, markup: &str) -> Self {
        self.chrome.extend(scan_anchors(markup));
        self
    }

    /// Current mount point content
    pub fn mount_html(&self) -> String {
        self.mount.borrow().clone()
    }

    /// How many times the mount point has been replaced
    pub fn replacements(&self) -> usize {
        self.replacements.get()
    }

    /// Every anchor in document order, chrome first
    pub fn all_anchors(&self) -> Vec<Rc<MemoryAnchor>> {
        self.chrome
            .iter()
            .chain(self.mount_anchors.borrow().iter())
            .cloned()
            .collect()
    }

    /// `href`s of anchors carrying `attribute` and `class`
    pub fn hrefs_with_class(&self, attribute: &str, class: &str) -> Vec<String> {
        self.anchors(attribute)
            .iter()
            .filter(|a| a.has_class(class))
            .filter_map(|a| a.href())
            .collect()
    }
}

impl Document for MemoryDocument {
    type Anchor = Rc<MemoryAnchor>;

    fn replace_mount(&self, mount_id: &str, markup: &str) -> ShellResult<()> {
        if mount_id != self.mount_id {
            return Err(ShellError::MountPointMissing(mount_id.to_string()));
        }

        *self.mount.borrow_mut() = markup.to_string();
        *self.mount_anchors.borrow_mut() = scan_anchors(markup);
        self.replacements.set(self.replacements.get() + 1);
        Ok(())
    }

    fn anchors(&self, attribute: &str) -> Vec<Self::Anchor> {
        self.all_anchors()
            .into_iter()
            .filter(|a| a.has_attribute(attribute))
            .collect()
    }
}
