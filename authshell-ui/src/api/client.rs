//! HTTP API Client
//!
//! Sign-in, registration and profile fetch against the auth REST API. The
//! bearer token from `POST /login` is kept in local storage.

use async_trait::async_trait;
use authshell::api::{
    ApiError, AuthApi, LoginRequest, ProfileApi, RegisterRequest, TokenResponse, TokenStore,
    UserProfile,
};
use authshell::config::ApiConfig;
use gloo_net::http::{Request, Response};
use web_sys::Storage;

/// Local storage key overriding the configured API base URL
const API_URL_KEY: &str = "authshell_api_url";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn local_storage_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

/// Get the API base URL from local storage or use the configured one
pub fn api_base(config: &ApiConfig) -> String {
    let url = local_storage_item(API_URL_KEY).unwrap_or_else(|| config.base_url.clone());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

async fn error_from(response: Response) -> ApiError {
    let body = response.text().await.unwrap_or_default();
    ApiError::from_status(response.status(), &body)
}

/// Bearer token under a local storage key
#[derive(Debug, Clone)]
pub struct LocalStorageTokens {
    key: String,
}

impl LocalStorageTokens {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            key: config.token_key.clone(),
        }
    }
}

impl TokenStore for LocalStorageTokens {
    fn token(&self) -> Option<String> {
        local_storage_item(&self.key)
    }

    fn set_token(&self, token: &str) -> Result<(), ApiError> {
        let storage =
            local_storage().ok_or_else(|| ApiError::Storage("local storage unavailable".to_string()))?;
        storage
            .set_item(&self.key, token)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn clear_token(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// Profile client over `fetch`
pub struct FetchProfileApi {
    base_url: String,
    tokens: LocalStorageTokens,
}

impl FetchProfileApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: api_base(config),
            tokens: LocalStorageTokens::new(config),
        }
    }
}

#[async_trait(?Send)]
impl ProfileApi for FetchProfileApi {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let token = self.tokens.token().ok_or(ApiError::NotAuthenticated)?;

        let response = Request::get(&format!("{}/profile", self.base_url))
            .header("Authorization", &format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Sign-in and registration over `fetch`
pub struct FetchAuthApi {
    base_url: String,
}

impl FetchAuthApi {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: api_base(config),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for FetchAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let response = Request::post(&format!("{}/login", self.base_url))
            .json(request)
            .map_err(|e| ApiError::Parse(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(error_from(response).await);
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(body.token)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = Request::post(&format!("{}/register", self.base_url))
            .json(request)
            .map_err(|e| ApiError::Parse(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(error_from(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn tokens_round_trip_through_local_storage() {
        let config = ApiConfig {
            token_key: "authshell_test_token".to_string(),
            ..ApiConfig::default()
        };
        let tokens = LocalStorageTokens::new(&config);
        tokens.clear_token();
        assert!(tokens.token().is_none());

        tokens.set_token("abc.def").unwrap();
        assert_eq!(tokens.token().as_deref(), Some("abc.def"));
        assert_eq!(local_storage_item("authshell_test_token").as_deref(), Some("abc.def"));

        tokens.clear_token();
        assert!(tokens.token().is_none());
    }
}
