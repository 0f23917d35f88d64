//! Login and registration views
//!
//! Only the markup lives here. Submissions are intercepted by the page's
//! submit listener and handled by [`crate::session::Session`]. The forms post
//! if no listener is bound, so credentials never land in the URL.

use async_trait::async_trait;

use super::{link, View, ViewResult};

/// Sign-in form
pub struct LoginView {
    link_attr: String,
}

impl LoginView {
    pub fn new(link_attr: &str) -> Self {
        Self {
            link_attr: link_attr.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl View for LoginView {
    async fn render(&self) -> ViewResult {
        Ok(format!(
            r#"<div class="view auth-view">
    <h1>Sign in</h1>
    <form id="loginForm" method="post">
        <div class="form-error" id="formError" role="alert"></div>
        <div class="form-group">
            <input type="text" name="username" placeholder="Username" required>
        </div>
        <div class="form-group">
            <input type="password" name="password" placeholder="Password" required>
        </div>
        <button type="submit" class="btn">Sign in</button>
    </form>
    <div class="auth-link">
        No account? {}
    </div>
</div>"#,
            link(&self.link_attr, "/register", None, "Register"),
        ))
    }
}

/// Registration form
pub struct RegisterView {
    link_attr: String,
}

impl RegisterView {
    pub fn new(link_attr: &str) -> Self {
        Self {
            link_attr: link_attr.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl View for RegisterView {
    async fn render(&self) -> ViewResult {
        // Field constraints mirror the API's register request validation.
        Ok(format!(
            r#"<div class="view auth-view">
    <h1>Create an account</h1>
    <form id="registerForm" method="post">
        <div class="form-error" id="formError" role="alert"></div>
        <div class="form-group">
            <input type="text" name="username" placeholder="Username" minlength="3" maxlength="50" required>
        </div>
        <div class="form-group">
            <input type="email" name="email" placeholder="Email" required>
        </div>
        <div class="form-group">
            <input type="password" name="password" placeholder="Password" minlength="8" required>
        </div>
        <button type="submit" class="btn">Register</button>
    </form>
    <div class="auth-link">
        Already registered? {}
    </div>
</div>"#,
            link(&self.link_attr, "/login", None, "Sign in"),
        ))
    }
}
