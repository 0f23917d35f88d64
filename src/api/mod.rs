//! Auth API contract
//!
//! `POST /register`, `POST /login` and `GET /profile` against the auth REST
//! API, plus the token store that carries the bearer token between them.

#[cfg(not(target_arch = "wasm32"))]
mod http;

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpProfileApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use thiserror::Error;

/// Profile returned by `GET /profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Body of `POST /login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful `POST /login` response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body returned by the auth API
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors from the auth API collaborator
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Map a non-success response to an error
    ///
    /// 401 means the token is missing or expired. Other statuses carry the
    /// API's `{"error": "..."}` message when the body has one.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::NotAuthenticated;
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| "Unknown error".to_string());

        ApiError::Status { status, message }
    }
}

/// Source of the signed-in user's profile
#[async_trait(?Send)]
pub trait ProfileApi {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;
}

/// Account creation and sign-in
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a bearer token
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError>;

    /// Create an account. Does not sign in.
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
}

/// Where the bearer token lives between requests
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> Result<(), ApiError>;
    fn clear_token(&self);
}

/// Token store held in memory
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set_token(&self, token: &str) -> Result<(), ApiError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) {
        self.token.borrow_mut().take();
    }
}
