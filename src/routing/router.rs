//! Router / Dispatcher
//!
//! Decides when a render cycle must run and keeps session history in step
//! with in-app navigation. Link clicks push one history entry and render;
//! pop-state only renders, since the browser has already moved.

use std::fmt;
use std::rc::Rc;
use url::Url;

use super::RouteTable;
use crate::browser::{Browser, Document};
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::render::{RenderCycle, Renderer};

/// Navigation triggers the shell listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Click on an anchor flagged as an in-app link
    LinkClick { href: Option<String> },
    /// Browser back/forward
    PopState,
}

/// What the event listener should do with a navigation event
pub enum Dispatch {
    /// Suppress the default navigation and drive the cycle
    Intercepted(RenderCycle),
    /// History already moved; drive the cycle
    Rerender(RenderCycle),
    /// Leave the event to the browser
    PassThrough,
}

impl Dispatch {
    /// Whether the browser's default action must be prevented
    pub fn prevents_default(&self) -> bool {
        matches!(self, Dispatch::Intercepted(_))
    }

    pub fn into_cycle(self) -> Option<RenderCycle> {
        match self {
            Dispatch::Intercepted(cycle) | Dispatch::Rerender(cycle) => Some(cycle),
            Dispatch::PassThrough => None,
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Intercepted(_) => f.write_str("Intercepted(..)"),
            Dispatch::Rerender(_) => f.write_str("Rerender(..)"),
            Dispatch::PassThrough => f.write_str("PassThrough"),
        }
    }
}

/// Client-side router
pub struct Router<B, D> {
    browser: Rc<B>,
    routes: Rc<RouteTable>,
    renderer: Renderer<B, D>,
}

impl<B, D> Router<B, D>
where
    B: Browser + 'static,
    D: Document + 'static,
{
    /// Wire a router over a browser, a document and a validated route table
    pub fn new(config: &ShellConfig, browser: Rc<B>, document: Rc<D>, routes: RouteTable) -> Self {
        let routes = Rc::new(routes);
        let renderer = Renderer::new(config, Rc::clone(&browser), document, Rc::clone(&routes));

        tracing::info!(
            routes = ?routes.paths(),
            policy = ?config.render.policy,
            mount = %config.mount.id,
            "Router initialized"
        );

        Self {
            browser,
            routes,
            renderer,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn renderer(&self) -> &Renderer<B, D> {
        &self.renderer
    }

    /// Render whatever the current location is, without touching history
    pub fn render(&self) -> RenderCycle {
        self.renderer.render()
    }

    /// Push a history entry for `url` and start a render cycle
    ///
    /// `url` is resolved against the current location. The entry is pushed
    /// before this returns, even if the cycle is never driven. Navigating to
    /// the current URL still pushes a new entry. Off-origin targets are
    /// refused and push nothing.
    pub fn navigate_to(&self, url: &str) -> ShellResult<RenderCycle> {
        let current = self.browser.location()?;
        let target = current.join(url)?;
        ensure_same_origin(&current, &target)?;

        self.browser.push_state(&target)?;
        tracing::info!(from = %current.path(), to = %target.path(), "Navigating");

        Ok(self.renderer.render())
    }

    /// Handle a navigation event from the event listeners
    pub fn handle(&self, event: NavigationEvent) -> Dispatch {
        match event {
            NavigationEvent::PopState => {
                tracing::debug!("History pop, re-rendering");
                Dispatch::Rerender(self.renderer.render())
            }
            NavigationEvent::LinkClick { href: None } => {
                tracing::warn!("In-app link without href, leaving it to the browser");
                Dispatch::PassThrough
            }
            NavigationEvent::LinkClick { href: Some(href) } => match self.navigate_to(&href) {
                Ok(cycle) => Dispatch::Intercepted(cycle),
                Err(e) => {
                    tracing::warn!(href = %href, error = %e, "Not intercepting link");
                    Dispatch::PassThrough
                }
            },
        }
    }
}

fn ensure_same_origin(current: &Url, target: &Url) -> ShellResult<()> {
    if current.origin() == target.origin() {
        Ok(())
    } else {
        Err(ShellError::CrossOrigin {
            target: target.to_string(),
            origin: current.origin().ascii_serialization(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{MemoryBrowser, MemoryDocument};
    use crate::render::RenderOutcome;
    use crate::views::view_fn;

    fn router(start: &str) -> (Router<MemoryBrowser, MemoryDocument>, Rc<MemoryBrowser>, Rc<MemoryDocument>) {
        let routes = RouteTable::builder(view_fn(|| async { Ok("missing".to_string()) }))
            .route("/", view_fn(|| async { Ok("home".to_string()) }))
            .route("/login", view_fn(|| async { Ok("login".to_string()) }))
            .build()
            .unwrap();
        let browser = Rc::new(MemoryBrowser::new(start).unwrap());
        let document = Rc::new(MemoryDocument::new("app"));
        let router = Router::new(
            &ShellConfig::default(),
            Rc::clone(&browser),
            Rc::clone(&document),
            routes,
        );
        (router, browser, document)
    }

    #[tokio::test]
    async fn test_navigate_pushes_once_and_renders() {
        let (router, browser, document) = router("http://localhost/");

        let cycle = router.navigate_to("/login").unwrap();
        assert_eq!(browser.history_len(), 2);
        assert_eq!(browser.pathname(), "/login");

        let outcome = cycle.await.unwrap();
        assert!(outcome.is_mounted());
        assert_eq!(document.mount_html(), "login");
        assert_eq!(document.replacements(), 1);
        assert_eq!(browser.history_len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_navigation_not_deduplicated() {
        let (router, browser, _document) = router("http://localhost/");

        router.navigate_to("/login").unwrap().await.unwrap();
        router.navigate_to("/login").unwrap().await.unwrap();
        assert_eq!(browser.history_len(), 3);
        assert_eq!(router.renderer().generation(), 2);
    }

    #[test]
    fn test_cross_origin_refused() {
        let (router, browser, _document) = router("http://localhost/");

        let err = router.navigate_to("https://example.com/login").err().unwrap();
        assert!(matches!(err, ShellError::CrossOrigin { .. }));
        assert_eq!(browser.history_len(), 1);
        assert_eq!(router.renderer().generation(), 0);
    }

    #[test]
    fn test_cross_origin_link_passes_through() {
        let (router, browser, _document) = router("http://localhost/");

        let dispatch = router.handle(NavigationEvent::LinkClick {
            href: Some("http://localhost:9000/login".to_string()),
        });
        assert!(matches!(dispatch, Dispatch::PassThrough));
        assert!(!dispatch.prevents_default());
        assert_eq!(browser.history_len(), 1);
    }

    #[test]
    fn test_link_without_href_passes_through() {
        let (router, _browser, _document) = router("http://localhost/");

        let dispatch = router.handle(NavigationEvent::LinkClick { href: None });
        assert!(dispatch.into_cycle().is_none());
    }

    #[tokio::test]
    async fn test_link_click_intercepted() {
        let (router, browser, document) = router("http://localhost/");

        let dispatch = router.handle(NavigationEvent::LinkClick {
            href: Some("http://localhost/login".to_string()),
        });
        assert!(dispatch.prevents_default());

        dispatch.into_cycle().unwrap().await.unwrap();
        assert_eq!(browser.pathname(), "/login");
        assert_eq!(document.mount_html(), "login");
    }

    #[tokio::test]
    async fn test_pop_state_renders_without_push() {
        let (router, browser, document) = router("http://localhost/");

        router.navigate_to("/login").unwrap().await.unwrap();
        assert!(browser.back());

        let dispatch = router.handle(NavigationEvent::PopState);
        assert!(!dispatch.prevents_default());
        let outcome = dispatch.into_cycle().unwrap().await.unwrap();

        assert!(matches!(outcome, RenderOutcome::Mounted { ref path, .. } if path == "/"));
        assert_eq!(document.mount_html(), "home");
        assert_eq!(browser.history_len(), 2);
    }
}
