//! Authshell Browser Entry
//!
//! Boots the SPA shell in the page: builds the route table, binds navigation
//! listeners and renders the current location into the mount point.
//!
//! # Architecture
//!
//! The router, renderer and views come from the `authshell` core crate. This
//! crate only supplies the `web-sys` browser adapters, the DOM listeners and
//! the `fetch`-based auth API clients. Built with trunk.

use authshell::{default_routes, Session, ShellConfig};
use std::rc::Rc;
use wasm_bindgen::JsValue;

mod api;
mod dom;
mod events;

use api::{FetchAuthApi, FetchProfileApi, LocalStorageTokens};
use dom::{WebBrowser, WebDocument};
use events::{bind_form_submission, bind_navigation_interception, spawn_cycle};

const CONFIG: &str = include_str!("../shell.toml");

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = match ShellConfig::from_toml_str(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::error_1(&format!("Invalid shell config: {}", e).into());
            ShellConfig::default()
        }
    };

    let level = config.logging.level.parse().unwrap_or(log::Level::Info);
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
    }

    if let Err(e) = start(&config) {
        tracing::error!(error = ?e, "Shell failed to start");
    }
}

fn start(config: &ShellConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let api = Rc::new(FetchProfileApi::new(&config.api));
    let routes = default_routes(config, api).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let router = Rc::new(authshell::Router::new(
        config,
        Rc::new(WebBrowser::new(window.clone())),
        Rc::new(WebDocument::new(document)),
        routes,
    ));

    let session = Rc::new(Session::new(
        Rc::new(FetchAuthApi::new(&config.api)),
        Rc::new(LocalStorageTokens::new(&config.api)),
    ));

    bind_navigation_interception(&window, Rc::clone(&router), &config.links.attribute)?;
    bind_form_submission(&window, Rc::clone(&router), session)?;
    spawn_cycle(router.render());

    Ok(())
}
