//! Error types for the language API layer

use thiserror::Error;

use crate::api::ApiAction;

/// Errors that can occur while calling the language API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The transport produced no usable response at all
    #[error("Error during the api call: {0}")]
    Transport(String),

    /// The gateway answered with a status other than `OK`
    #[error("Wrong response: {}{}{data}", render_tag("Type", .error_type), render_tag("Code", .error_code))]
    Rejected {
        error_type: Option<String>,
        error_code: Option<String>,
        data: String,
    },

    /// The call succeeded but the payload is the `false`/absent sentinel
    #[error("Wrong content!")]
    NoContent,

    /// The payload is valid but has the wrong shape for the action
    #[error("Unexpected payload for {action}: expected {expected}")]
    UnexpectedPayload {
        action: ApiAction,
        expected: &'static str,
    },
}

impl ApiError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }
}

fn render_tag(label: &str, value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => format!("{label}({v}) "),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_with_type_and_code() {
        let error = ApiError::Rejected {
            error_type: Some("auth".to_string()),
            error_code: Some("403".to_string()),
            data: "denied".to_string(),
        };
        assert_eq!(error.to_string(), "Wrong response: Type(auth) Code(403) denied");
    }

    #[test]
    fn test_rejected_message_skips_empty_tags() {
        let error = ApiError::Rejected {
            error_type: Some(String::new()),
            error_code: None,
            data: "maintenance".to_string(),
        };
        assert_eq!(error.to_string(), "Wrong response: maintenance");
    }

    #[test]
    fn test_unexpected_payload_message() {
        let error = ApiError::UnexpectedPayload {
            action: ApiAction::GetAppletLanguages,
            expected: "a list of languages",
        };
        assert_eq!(
            error.to_string(),
            "Unexpected payload for getAppletLanguages: expected a list of languages"
        );
    }
}
