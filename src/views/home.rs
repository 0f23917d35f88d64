//! Home view

use async_trait::async_trait;

use super::{link, View, ViewResult};

/// Landing page with the sign-in and registration entry points
pub struct HomeView {
    link_attr: String,
}

impl HomeView {
    pub fn new(link_attr: &str) -> Self {
        Self {
            link_attr: link_attr.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl View for HomeView {
    async fn render(&self) -> ViewResult {
        Ok(format!(
            r#"<div class="view home-view">
    <h1>Welcome</h1>
    <div class="actions">
        {}
        {}
    </div>
</div>"#,
            link(&self.link_attr, "/login", Some("btn"), "Sign in"),
            link(&self.link_attr, "/register", Some("btn secondary"), "Register"),
        ))
    }
}
