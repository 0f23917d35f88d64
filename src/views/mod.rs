//! View Producers
//!
//! A view producer is a zero-argument, possibly asynchronous function that
//! returns one complete markup fragment for a full application view. The
//! renderer stores producers behind the [`View`] trait and never inspects
//! their output.
//!
//! Producers that need data fetch it themselves and must resolve, either with
//! content or with an error-state fragment. A producer that returns `Err`
//! aborts its render cycle and leaves the previous content mounted.

mod auth;
mod home;
mod not_found;
mod profile;

pub use auth::{LoginView, RegisterView};
pub use home::HomeView;
pub use not_found::NotFoundView;
pub use profile::ProfileView;

use async_trait::async_trait;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

use crate::api::{ApiError, ProfileApi};
use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::routing::RouteTable;

/// Complete markup for one view
pub type Markup = String;

/// Result of running a view producer
pub type ViewResult = Result<Markup, ViewError>;

/// Errors a view producer can fail with
#[derive(Error, Debug)]
pub enum ViewError {
    /// A data fetch inside the producer failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Any other producer failure
    #[error("View failed: {0}")]
    Failed(String),
}

/// A view producer
#[async_trait(?Send)]
pub trait View {
    /// Produce the full markup for this view
    async fn render(&self) -> ViewResult;
}

/// Adapter turning a closure into a [`View`]
pub struct FnView<F>(F);

#[async_trait(?Send)]
impl<F, Fut> View for FnView<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ViewResult> + 'static,
{
    async fn render(&self) -> ViewResult {
        (self.0)().await
    }
}

/// Wrap a closure returning a future of markup as a view producer
pub fn view_fn<F, Fut>(f: F) -> FnView<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ViewResult> + 'static,
{
    FnView(f)
}

/// Build the application route table
///
/// `/`, `/login`, `/register` and `/profile`, with [`NotFoundView`] as the
/// fallback. Links in every view carry the configured link attribute.
pub fn default_routes(config: &ShellConfig, api: Rc<dyn ProfileApi>) -> ShellResult<RouteTable> {
    let attr = config.links.attribute.as_str();

    RouteTable::builder(NotFoundView::new(attr))
        .route("/", HomeView::new(attr))
        .route("/login", LoginView::new(attr))
        .route("/register", RegisterView::new(attr))
        .route("/profile", ProfileView::new(attr, api))
        .build()
}

/// Render an in-app anchor
pub(crate) fn link(attr: &str, href: &str, class: Option<&str>, label: &str) -> String {
    match class {
        Some(class) => format!(
            r#"<a href="{}" {} class="{}">{}</a>"#,
            escape_html(href),
            attr,
            escape_html(class),
            escape_html(label)
        ),
        None => format!(
            r#"<a href="{}" {}>{}</a>"#,
            escape_html(href),
            attr,
            escape_html(label)
        ),
    }
}

/// Escape text for inclusion in markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserProfile;

    struct NoProfile;

    #[async_trait(?Send)]
    impl ProfileApi for NoProfile {
        async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
            Err(ApiError::NotAuthenticated)
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b a="1">&'x'</b>"#),
            "&lt;b a=&quot;1&quot;&gt;&amp;&#39;x&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_link_markup() {
        assert_eq!(
            link("data-link", "/login", Some("btn"), "Sign in"),
            r#"<a href="/login" data-link class="btn">Sign in</a>"#
        );
        assert_eq!(
            link("data-nav", "/", None, "Home"),
            r#"<a href="/" data-nav>Home</a>"#
        );
    }

    #[tokio::test]
    async fn test_view_fn_adapter() {
        let view = view_fn(|| async { Ok("<p>hi</p>".to_string()) });
        assert_eq!(view.render().await.unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_default_routes() {
        let table = default_routes(&ShellConfig::default(), Rc::new(NoProfile)).unwrap();
        assert_eq!(table.len(), 4);
        for path in ["/", "/login", "/register", "/profile"] {
            assert!(table.contains(path), "missing {}", path);
        }
        assert!(!table.contains("/unknown"));
    }
}
