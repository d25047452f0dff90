//! Request and response types for the language API

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Routing target shared by every language API call
pub const API_TARGET: &str = "system_api";
/// Routing mode shared by every language API call
pub const API_MODE: &str = "language_api";
/// System identifier shared by every language API call
pub const API_SYSTEM: &str = "LanguageFiles";

/// Actions exposed by the language API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiAction {
    GetLanguageFile,
    GetAppletLanguages,
    GetAppletLanguageFile,
}

impl ApiAction {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiAction::GetLanguageFile => "getLanguageFile",
            ApiAction::GetAppletLanguages => "getAppletLanguages",
            ApiAction::GetAppletLanguageFile => "getAppletLanguageFile",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call against the language API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub action: ApiAction,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn language_file(language: &str) -> Self {
        Self {
            action: ApiAction::GetLanguageFile,
            params: vec![("language", language.to_string())],
        }
    }

    pub fn applet_languages(applet: &str) -> Self {
        Self {
            action: ApiAction::GetAppletLanguages,
            params: vec![("applet", applet.to_string())],
        }
    }

    pub fn applet_language_file(applet: &str, language: &str) -> Self {
        Self {
            action: ApiAction::GetAppletLanguageFile,
            params: vec![
                ("applet", applet.to_string()),
                ("language", language.to_string()),
            ],
        }
    }

    /// Fixed routing metadata plus the action, sent with every request
    pub fn route(&self) -> [(&'static str, &'static str); 4] {
        [
            ("target", API_TARGET),
            ("mode", API_MODE),
            ("system", API_SYSTEM),
            ("action", self.action.as_str()),
        ]
    }

    /// Look up a parameter value by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The `data` member of an API response
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Text(String),
    Languages(Vec<String>),
    /// `false`, `null` or a missing `data` member
    Absent,
    Other(Value),
}

impl ApiPayload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => ApiPayload::Absent,
            Value::String(text) => ApiPayload::Text(text),
            Value::Array(items) if items.iter().all(Value::is_string) => ApiPayload::Languages(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => ApiPayload::Other(other),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ApiPayload::Absent)
    }

    /// String rendering used in error diagnostics
    pub fn render(&self) -> String {
        match self {
            ApiPayload::Text(text) => text.clone(),
            ApiPayload::Languages(languages) => languages.join(", "),
            ApiPayload::Absent => String::new(),
            ApiPayload::Other(value) => value.to_string(),
        }
    }
}

/// A parsed API response. Only the transport builds these, and only when a
/// status was present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: String,
    pub data: ApiPayload,
    pub error_type: Option<String>,
    pub error_code: Option<String>,
}

impl ApiResponse {
    pub const STATUS_OK: &'static str = "OK";

    pub fn ok(data: ApiPayload) -> Self {
        Self {
            status: Self::STATUS_OK.to_string(),
            data,
            error_type: None,
            error_code: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}

/// Response body as it arrives on the wire
#[derive(Debug, Deserialize)]
pub struct WireResponse {
    pub status: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_code: Option<String>,
}

impl WireResponse {
    /// Convert into an [`ApiResponse`], or `None` when the status is missing
    pub fn into_response(self) -> Option<ApiResponse> {
        let status = self.status?;
        Some(ApiResponse {
            status,
            data: ApiPayload::from_value(self.data),
            error_type: self.error_type,
            error_code: self.error_code,
        })
    }
}

// Error codes arrive as either strings or numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
