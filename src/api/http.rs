//! Native profile client
//!
//! Used by the preview tool to render `/profile` against a running API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{ApiError, ProfileApi, UserProfile};

/// Profile client over reqwest
pub struct HttpProfileApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpProfileApi {
    /// Create a client for `base_url`, authenticating with `token` if given
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn profile_url(&self) -> String {
        format!("{}/profile", self.base_url)
    }
}

#[async_trait(?Send)]
impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;

        let response = self
            .client
            .get(self.profile_url())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
