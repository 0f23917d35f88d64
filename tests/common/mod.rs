//! Shared harness for the navigation tests.

#![allow(dead_code)]

use async_trait::async_trait;
use authshell::api::{
    ApiError, AuthApi, LoginRequest, MemoryTokenStore, ProfileApi, RegisterRequest, TokenStore,
    UserProfile,
};
use authshell::browser::{Anchor, Document, MemoryBrowser, MemoryDocument};
use authshell::{
    default_routes, NavigationEvent, RenderOutcome, RouteTable, Router, Session, ShellConfig,
    ShellResult,
};
use std::cell::RefCell;
use std::rc::Rc;

pub const ORIGIN: &str = "http://localhost:8080";

/// Navigation bar rendered outside the mount point
pub const NAV: &str = r#"<nav>
    <a href="/" data-link>Home</a>
    <a href="/login" data-link>Sign in</a>
    <a href="/register" data-link>Register</a>
    <a href="/profile" data-link>Profile</a>
    <a href="https://example.com/help">Help</a>
</nav>"#;

/// Profile source for a visitor with no session
pub struct SignedOut;

#[async_trait(?Send)]
impl ProfileApi for SignedOut {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        Err(ApiError::NotAuthenticated)
    }
}

/// Auth backend with registration and one bearer token per account
#[derive(Default)]
pub struct Accounts {
    users: RefCell<Vec<RegisterRequest>>,
}

impl Accounts {
    pub fn with_user(username: &str, password: &str) -> Self {
        let accounts = Self::default();
        accounts.users.borrow_mut().push(RegisterRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: password.to_string(),
        });
        accounts
    }

    fn profile_for(&self, token: &str) -> Option<UserProfile> {
        let username = token.strip_prefix("token-")?;
        let users = self.users.borrow();
        let profile = users
            .iter()
            .enumerate()
            .find(|(_, u)| u.username == username)
            .map(|(i, u)| UserProfile {
                id: i as i64 + 1,
                username: u.username.clone(),
                email: u.email.clone(),
            });
        profile
    }
}

#[async_trait(?Send)]
impl AuthApi for Accounts {
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let known = self
            .users
            .borrow()
            .iter()
            .any(|u| u.username == request.username && u.password == request.password);
        if known {
            Ok(format!("token-{}", request.username))
        } else {
            Err(ApiError::from_status(401, r#"{"error": "invalid credentials"}"#))
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        if self.users.borrow().iter().any(|u| u.username == request.username) {
            return Err(ApiError::from_status(400, r#"{"error": "user already exists"}"#));
        }
        self.users.borrow_mut().push(request.clone());
        Ok(())
    }
}

/// Profile source reading the bearer token the session stored
pub struct StoredTokenProfile {
    pub accounts: Rc<Accounts>,
    pub tokens: Rc<MemoryTokenStore>,
}

#[async_trait(?Send)]
impl ProfileApi for StoredTokenProfile {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let token = self.tokens.token().ok_or(ApiError::NotAuthenticated)?;
        self.accounts
            .profile_for(&token)
            .ok_or(ApiError::NotAuthenticated)
    }
}

/// A headless shell session
pub struct Shell {
    pub config: ShellConfig,
    pub router: Router<MemoryBrowser, MemoryDocument>,
    pub browser: Rc<MemoryBrowser>,
    pub document: Rc<MemoryDocument>,
}

impl Shell {
    /// Session on `path` with custom routes, nothing rendered yet
    pub fn with_routes(path: &str, config: ShellConfig, routes: RouteTable, chrome: &str) -> Self {
        let browser = Rc::new(MemoryBrowser::new(&format!("{}{}", ORIGIN, path)).unwrap());
        let document = Rc::new(MemoryDocument::new(&config.mount.id).with_chrome(chrome));
        let router = Router::new(&config, Rc::clone(&browser), Rc::clone(&document), routes);

        Self {
            config,
            router,
            browser,
            document,
        }
    }

    /// Session on `path` with the application routes, nothing rendered yet
    pub fn app(path: &str) -> Self {
        let config = ShellConfig::default();
        let routes = default_routes(&config, Rc::new(SignedOut)).unwrap();
        Self::with_routes(path, config, routes, "")
    }

    /// Application session with the navigation bar
    pub fn app_with_nav(path: &str) -> Self {
        let config = ShellConfig::default();
        let routes = default_routes(&config, Rc::new(SignedOut)).unwrap();
        Self::with_routes(path, config, routes, NAV)
    }

    /// Application session wired to `accounts`, plus the sign-in session
    pub fn app_with_accounts(path: &str, accounts: Accounts) -> (Self, Session, Rc<MemoryTokenStore>) {
        let config = ShellConfig::default();
        let accounts = Rc::new(accounts);
        let tokens = Rc::new(MemoryTokenStore::new());
        let profile = StoredTokenProfile {
            accounts: Rc::clone(&accounts),
            tokens: Rc::clone(&tokens),
        };
        let routes = default_routes(&config, Rc::new(profile)).unwrap();
        let session = Session::new(accounts, tokens.clone());

        (Self::with_routes(path, config, routes, NAV), session, tokens)
    }

    /// Initial page load
    pub async fn load(&self) -> ShellResult<RenderOutcome> {
        self.router.render().await
    }

    /// Click the flagged anchor whose href is `href`
    pub async fn click(&self, href: &str) -> ShellResult<RenderOutcome> {
        let anchor = self
            .document
            .anchors(&self.config.links.attribute)
            .into_iter()
            .find(|a| a.href().as_deref() == Some(href))
            .unwrap_or_else(|| panic!("no in-app link to {}", href));

        let dispatch = self.router.handle(NavigationEvent::LinkClick { href: anchor.href() });
        assert!(dispatch.prevents_default(), "click on {} was not intercepted", href);
        dispatch.into_cycle().unwrap().await
    }

    /// Press the back button
    pub async fn back(&self) -> ShellResult<RenderOutcome> {
        assert!(self.browser.back(), "nothing to go back to");
        self.router
            .handle(NavigationEvent::PopState)
            .into_cycle()
            .unwrap()
            .await
    }

    /// hrefs of anchors currently marked active
    pub fn active_links(&self) -> Vec<String> {
        self.document
            .hrefs_with_class(&self.config.links.attribute, &self.config.links.active_class)
    }

    pub fn mount(&self) -> String {
        self.document.mount_html()
    }
}
