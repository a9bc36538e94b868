//! Error types module
//!
//! All failures surfaced by the client are unified under [`VdoCipherError`]:
//! validation errors raised before any request is sent, API errors for non-2xx
//! responses, and response-shape errors for bodies that are not a JSON object or
//! array. Invalid configuration is reported as [`VdoCipherError::Config`].

use std::io;

use reqwest::Error as ReqwestError;

/// Describes how an error should be reported to the caller.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "API_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the same request may succeed if sent again later
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the caller
    fn suggested_action(&self) -> Option<&'static str>;
}

#[derive(Debug, thiserror::Error)]
pub enum VdoCipherError {
    #[error("Invalid userId '{0}'. Must be <=36 chars and only contain letters, numbers, dashes (-), or underscores (_)")]
    InvalidUserId(String),

    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    #[error("VdoCipher API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected VdoCipher API response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] ReqwestError),

    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VdoCipherError {
    /// Build an API error from a failed response body.
    ///
    /// The server's JSON `message` field is preferred; the raw body is used when
    /// the body is not JSON or has no message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.to_string());

        VdoCipherError::Api { status, message }
    }

    /// True for errors raised locally before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VdoCipherError::InvalidUserId(_) | VdoCipherError::InvalidUrl(_)
        )
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            VdoCipherError::Api { status, .. } => Some(*status),
            VdoCipherError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl ErrorMetadata for VdoCipherError {
    fn error_code(&self) -> &'static str {
        match self {
            VdoCipherError::InvalidUserId(_) => "INVALID_USER_ID",
            VdoCipherError::InvalidUrl(_) => "INVALID_URL",
            VdoCipherError::Api { .. } => "API_ERROR",
            VdoCipherError::UnexpectedResponse(_) => "UNEXPECTED_RESPONSE",
            VdoCipherError::Http(_) => "HTTP_ERROR",
            VdoCipherError::Encode(_) => "ENCODE_ERROR",
            VdoCipherError::Io(_) => "IO_ERROR",
            VdoCipherError::Config(_) => "CONFIG_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            VdoCipherError::Api { status, .. } => *status == 429 || *status >= 500,
            VdoCipherError::Http(_) => true,
            _ => false,
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            VdoCipherError::InvalidUserId(_) => {
                Some("Use at most 36 letters, digits, dashes or underscores")
            }
            VdoCipherError::InvalidUrl(_) => Some("Provide an absolute URL with a host"),
            VdoCipherError::Api { status: 401, .. } | VdoCipherError::Api { status: 403, .. } => {
                Some("Check VDOCIPHER_API_KEY")
            }
            VdoCipherError::Api { status: 404, .. } => Some("Verify the video or player ID exists"),
            VdoCipherError::Api { .. } | VdoCipherError::Http(_) => {
                Some("Retry after a short delay")
            }
            VdoCipherError::Config(_) => Some("Check VDOCIPHER_* environment variables"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_prefers_json_message() {
        let err = VdoCipherError::from_response(404, r#"{"message":"Video not found"}"#);
        match err {
            VdoCipherError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Video not found");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_falls_back_to_body() {
        let err = VdoCipherError::from_response(502, "Bad Gateway");
        assert_eq!(err.to_string(), "VdoCipher API error (502): Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_from_response_json_without_message() {
        let err = VdoCipherError::from_response(400, r#"{"error":"nope"}"#);
        assert_eq!(
            err.to_string(),
            r#"VdoCipher API error (400): {"error":"nope"}"#
        );
    }

    #[test]
    fn test_error_metadata() {
        let err = VdoCipherError::InvalidUserId("bad id".to_string());
        assert_eq!(err.error_code(), "INVALID_USER_ID");
        assert!(err.is_validation());
        assert!(!err.is_recoverable());

        let err = VdoCipherError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.error_code(), "API_ERROR");
        assert!(!err.is_validation());
        assert!(err.is_recoverable());
        assert_eq!(err.suggested_action(), Some("Retry after a short delay"));

        let err = VdoCipherError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.suggested_action(), Some("Check VDOCIPHER_API_KEY"));
    }
}
