//! Profile view
//!
//! The one producer that fetches data before resolving. Every fetch failure
//! is turned into an error-state fragment so the render cycle always mounts.

use async_trait::async_trait;
use std::rc::Rc;

use super::{escape_html, link, View, ViewResult};
use crate::api::{ApiError, ProfileApi, UserProfile};

/// Signed-in user's profile
pub struct ProfileView {
    link_attr: String,
    api: Rc<dyn ProfileApi>,
}

impl ProfileView {
    pub fn new(link_attr: &str, api: Rc<dyn ProfileApi>) -> Self {
        Self {
            link_attr: link_attr.to_string(),
            api,
        }
    }

    fn profile_markup(&self, user: &UserProfile) -> String {
        format!(
            r#"<div class="view profile-view">
    <h1>Profile</h1>
    <dl class="profile">
        <dt>Username</dt><dd>{}</dd>
        <dt>Email</dt><dd>{}</dd>
        <dt>ID</dt><dd>{}</dd>
    </dl>
    {}
</div>"#,
            escape_html(&user.username),
            escape_html(&user.email),
            user.id,
            link(&self.link_attr, "/", Some("btn secondary"), "Home"),
        )
    }

    fn error_markup(&self, err: &ApiError) -> String {
        let message = match err {
            ApiError::NotAuthenticated => "You need to sign in to see your profile.".to_string(),
            other => format!("Could not load profile: {}", other),
        };

        format!(
            r#"<div class="view profile-view error">
    <h1>Profile</h1>
    <p class="error-message">{}</p>
    {}
</div>"#,
            escape_html(&message),
            link(&self.link_attr, "/login", Some("btn"), "Sign in"),
        )
    }
}

#[async_trait(?Send)]
impl View for ProfileView {
    async fn render(&self) -> ViewResult {
        match self.api.fetch_profile().await {
            Ok(user) => Ok(self.profile_markup(&user)),
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed");
                Ok(self.error_markup(&e))
            }
        }
    }
}
