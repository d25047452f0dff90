//! Port interfaces for the language API

use async_trait::async_trait;

use crate::api::{ApiError, ApiRequest, ApiResponse};

/// Sends a request to the remote language API
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue one call. Implementations return [`ApiError::Transport`] whenever no
    /// usable response with a status was received.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}
