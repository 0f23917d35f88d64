//! DOM Adapters
//!
//! `web-sys` implementations of the shell's browser boundary.

use authshell::browser::{Anchor, Browser, Document};
use authshell::{ShellError, ShellResult};
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Window};

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Window location and history
pub struct WebBrowser {
    window: Window,
}

impl WebBrowser {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Browser for WebBrowser {
    fn location(&self) -> ShellResult<Url> {
        let href = self
            .window
            .location()
            .href()
            .map_err(|e| ShellError::History(js_message(&e)))?;
        Ok(Url::parse(&href)?)
    }

    fn push_state(&self, url: &Url) -> ShellResult<()> {
        let history = self
            .window
            .history()
            .map_err(|e| ShellError::History(js_message(&e)))?;

        history
            .push_state_with_url(&JsValue::NULL, "", Some(url.as_str()))
            .map_err(|e| ShellError::History(js_message(&e)))
    }
}

/// The live document
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    type Anchor = WebAnchor;

    fn replace_mount(&self, mount_id: &str, markup: &str) -> ShellResult<()> {
        let mount = self
            .document
            .get_element_by_id(mount_id)
            .ok_or_else(|| ShellError::MountPointMissing(mount_id.to_string()))?;
        mount.set_inner_html(markup);
        Ok(())
    }

    fn anchors(&self, attribute: &str) -> Vec<WebAnchor> {
        let nodes = match self.document.query_selector_all(&format!("[{}]", attribute)) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(attribute, error = %js_message(&e), "Link query failed");
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebAnchor)
            .collect()
    }
}

/// A flagged anchor element
pub struct WebAnchor(Element);

impl Anchor for WebAnchor {
    fn href(&self) -> Option<String> {
        self.0.get_attribute("href")
    }

    fn toggle_class(&self, class: &str, on: bool) {
        if let Err(e) = self.0.class_list().toggle_with_force(class, on) {
            tracing::warn!(class, error = %js_message(&e), "Class toggle failed");
        }
    }
}
