//! Errors raised while talking to the recommendation backend

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status
    #[error("backend returned {status}{}", detail(.message))]
    Api { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid backend URL: {0}")]
    InvalidBaseUrl(String),
}

/// Shape of the backend's error bodies
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ClientError {
    /// Build an API error from a raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            message: error_message(body),
        }
    }

    /// The server-provided message, or `fallback` for anything else
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

/// Extract the `error` field from a JSON error body
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error": "Username atau password salah"}"#).as_deref(),
            Some("Username atau password salah")
        );
        assert_eq!(error_message(r#"{"msg": "nope"}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"error": ""}"#), None);
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ClientError::from_response(401, r#"{"error": "Invalid credentials"}"#);
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");

        let err = ClientError::from_response(500, "");
        assert_eq!(err.user_message("Server Error"), "Server Error");

        let err = ClientError::InvalidBaseUrl("nope".into());
        assert_eq!(err.user_message("Server Error"), "Server Error");
    }

    #[test]
    fn test_display() {
        let err = ClientError::from_response(409, r#"{"error": "User exists"}"#);
        assert_eq!(err.to_string(), "backend returned 409: User exists");

        let err = ClientError::from_response(500, "");
        assert_eq!(err.to_string(), "backend returned 500");
    }
}
