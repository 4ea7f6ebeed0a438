use thiserror::Error;
use crate::types::ArticleId;

/// Errors are `Clone` so a single in-flight request can hand its outcome to
/// every caller waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Article not found: {0}")]
    NotFound(ArticleId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Transport failures and 5xx answers may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else if let Some(status) = e.status() {
            Error::Server {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            Error::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(Error::Network("connection refused".to_string()).is_retryable());
        assert!(Error::Server { status: 503, message: "unavailable".to_string() }.is_retryable());
        assert!(!Error::Server { status: 418, message: "teapot".to_string() }.is_retryable());
        assert!(!Error::NotFound(ArticleId::from("7")).is_retryable());
        assert!(!Error::Validation("title is required".to_string()).is_retryable());
    }

    #[test]
    fn test_display() {
        let err = Error::NotFound(ArticleId::from("42"));
        assert_eq!(err.to_string(), "Article not found: 42");
        assert!(err.is_not_found());

        let err = Error::Server { status: 500, message: "boom".to_string() };
        assert_eq!(err.to_string(), "Server error (500): boom");
    }
}
