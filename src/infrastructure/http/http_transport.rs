//! HTTP-based language API transport

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::api::{ApiError, ApiRequest, ApiResponse, ApiTransport, WireResponse};
use crate::config::ApiSettings;

/// Calls the language API over HTTP(S)
///
/// Each call is a `POST` to the configured endpoint: the routing metadata and
/// action travel in the query string, the action parameters in a form body.
pub struct HttpApiTransport {
    client: Client,
    endpoint: Url,
}

impl HttpApiTransport {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        if !matches!(settings.base_url.scheme(), "http" | "https") {
            return Err(ApiError::transport(format!(
                "HttpApiTransport only handles HTTP(S) URLs, got: {}",
                settings.base_url
            )));
        }

        let user_agent = settings.user_agent.clone().unwrap_or_else(|| {
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
        });

        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: settings.base_url.clone(),
        })
    }
}

#[async_trait]
impl ApiTransport for HttpApiTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        debug!("POST {} action={}", self.endpoint, request.action);

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&request.route())
            .form(&request.params)
            .send()
            .await
            .map_err(|e| {
                ApiError::transport(format!(
                    "Failed to call {} on {}: {}",
                    request.action, self.endpoint, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::transport(format!(
                "HTTP {} when calling {}",
                status, request.action
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response body: {}", e)))?;
        if body.trim().is_empty() {
            return Err(ApiError::transport(format!(
                "Empty response for {}",
                request.action
            )));
        }

        let wire: WireResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::transport(format!(
                "Failed to parse response for {}: {}",
                request.action, e
            ))
        })?;

        wire.into_response().ok_or_else(|| {
            ApiError::transport(format!(
                "Response for {} has no status field",
                request.action
            ))
        })
    }
}
