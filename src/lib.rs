//! # Authshell
//!
//! Client-side SPA shell: intercepts in-app navigation, maps URL paths to
//! view producers and re-renders a single mount point without page reloads.
//!
//! ## Modules
//!
//! - [`routing`]: route table, navigation interception and history updates
//! - [`render`]: render cycle and active-link sync
//! - [`views`]: view producers for the auth frontend
//! - [`browser`]: browser/document traits plus a headless implementation
//! - [`api`]: auth API contract and bearer token storage
//! - [`session`]: sign-in and registration form submissions
//!
//! The core is single-threaded and never touches a real DOM, so it runs the
//! same on `wasm32-unknown-unknown` and natively.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use authshell::browser::{MemoryBrowser, MemoryDocument};
//! use authshell::routing::{RouteTable, Router};
//! use authshell::views::view_fn;
//! use authshell::ShellConfig;
//! use std::rc::Rc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = RouteTable::builder(view_fn(|| async { Ok("<h1>404</h1>".to_string()) }))
//!         .route("/", view_fn(|| async { Ok(r#"<a href="/about" data-link>About</a>"#.to_string()) }))
//!         .route("/about", view_fn(|| async { Ok("<h1>About</h1>".to_string()) }))
//!         .build()?;
//!
//!     let browser = Rc::new(MemoryBrowser::new("http://localhost/")?);
//!     let document = Rc::new(MemoryDocument::new("app"));
//!     let router = Router::new(&ShellConfig::default(), browser, Rc::clone(&document), routes);
//!
//!     router.render().await?;
//!     router.navigate_to("/about")?.await?;
//!
//!     println!("{}", document.mount_html());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod render;
pub mod routing;
pub mod session;
pub mod views;

pub use browser::{Anchor, Browser, Document};
pub use config::{ConfigError, RenderPolicy, ShellConfig};
pub use error::{ShellError, ShellResult};
pub use render::{RenderCycle, RenderOutcome, RenderPhase, Renderer};
pub use routing::{Dispatch, NavigationEvent, RouteMatch, RouteTable, Router};
pub use session::{AuthForm, Session};
pub use views::{default_routes, view_fn, Markup, View, ViewError, ViewResult};
