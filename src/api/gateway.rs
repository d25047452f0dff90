//! Gateway to the language API
//!
//! Every call goes through [`LanguageApi::call`], which attaches the fixed
//! routing metadata via the transport and validates the response the same way
//! for all actions. The typed helpers then check the payload shape.

use std::sync::Arc;
use tracing::debug;

use crate::api::{ApiAction, ApiError, ApiPayload, ApiRequest, ApiResponse, ApiTransport};

/// Language API client with uniform result validation
#[derive(Clone)]
pub struct LanguageApi {
    transport: Arc<dyn ApiTransport>,
}

impl LanguageApi {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Issue a call and return the validated payload
    pub async fn call(&self, request: ApiRequest) -> Result<ApiPayload, ApiError> {
        debug!(action = %request.action, params = ?request.params, "Calling language API");
        let response = self.transport.send(&request).await?;
        validate(response)
    }

    /// Fetch the language file for a language
    pub async fn language_file(&self, language: &str) -> Result<String, ApiError> {
        match self.call(ApiRequest::language_file(language)).await? {
            ApiPayload::Text(content) => Ok(content),
            _ => Err(ApiError::UnexpectedPayload {
                action: ApiAction::GetLanguageFile,
                expected: "language file content",
            }),
        }
    }

    /// Fetch the languages available for an applet
    pub async fn applet_languages(&self, applet: &str) -> Result<Vec<String>, ApiError> {
        match self.call(ApiRequest::applet_languages(applet)).await? {
            ApiPayload::Languages(languages) => Ok(languages),
            _ => Err(ApiError::UnexpectedPayload {
                action: ApiAction::GetAppletLanguages,
                expected: "a list of languages",
            }),
        }
    }

    /// Fetch the language XML of an applet
    pub async fn applet_language_file(
        &self,
        applet: &str,
        language: &str,
    ) -> Result<String, ApiError> {
        match self
            .call(ApiRequest::applet_language_file(applet, language))
            .await?
        {
            ApiPayload::Text(content) => Ok(content),
            _ => Err(ApiError::UnexpectedPayload {
                action: ApiAction::GetAppletLanguageFile,
                expected: "applet language XML",
            }),
        }
    }
}

/// Reject non-`OK` statuses and the no-content sentinel
pub fn validate(response: ApiResponse) -> Result<ApiPayload, ApiError> {
    if !response.is_ok() {
        return Err(ApiError::Rejected {
            error_type: response.error_type,
            error_code: response.error_code,
            data: response.data.render(),
        });
    }
    if response.data.is_absent() {
        return Err(ApiError::NoContent);
    }
    Ok(response.data)
}
