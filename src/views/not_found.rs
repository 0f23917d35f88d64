//! Fallback view for unregistered paths

use async_trait::async_trait;

use super::{link, View, ViewResult};

/// 404 view
pub struct NotFoundView {
    link_attr: String,
}

impl NotFoundView {
    pub fn new(link_attr: &str) -> Self {
        Self {
            link_attr: link_attr.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl View for NotFoundView {
    async fn render(&self) -> ViewResult {
        Ok(format!(
            r#"<div class="view not-found-view">
    <h1>Page not found</h1>
    <p>The page you are looking for does not exist.</p>
    {}
</div>"#,
            link(&self.link_attr, "/", Some("btn"), "Back to home"),
        ))
    }
}
