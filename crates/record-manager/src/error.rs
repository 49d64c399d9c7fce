//! Error Types
//!
//! One error enum for the whole client: transport, backend status,
//! decoding and draft validation.

use thiserror::Error;

/// Client-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Validation errors are raised before any request is sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingField(_) | Error::InvalidField { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Decode(e.to_string())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let error = Error::Status { status: 400, body: "{\"year\":[\"required\"]}".to_string() };
        let display = error.to_string();
        assert!(display.contains("400"));
        assert!(display.contains("year"));
    }

    #[test]
    fn test_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Decode(_)));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::MissingField("name".into()).is_validation());
        assert!(Error::InvalidField { field: "year".into(), reason: "not a number".into() }.is_validation());
        assert!(!Error::Transport("offline".into()).is_validation());
    }
}
