use reqwest::StatusCode;
use thiserror::Error;

/// Error types for translation backends
///
/// Only [`MtError::Unavailable`] is treated as recoverable by the chain: the
/// orchestrator gives up on that attempt and picks again. Every other variant
/// ends the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// The backend's model or remote resource could not be obtained
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    /// `translate` was called for a pair the backend has no codes for
    #[error("{backend} does not support {from}->{to}")]
    UnsupportedPair {
        backend: String,
        from: String,
        to: String,
    },
    /// Missing or rejected credentials, bad request parameters
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// The backend answered, but not with a usable translation
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// General error with context
    #[error("{0}")]
    Other(String),
}

impl MtError {
    /// Whether this is the "environment unavailable" class
    pub fn is_unavailable(&self) -> bool {
        matches!(self, MtError::Unavailable(_))
    }

    /// Map a non-success HTTP status from a backend to an error
    ///
    /// 404 (no such model) and 503 (model not loaded / overloaded) mean the
    /// resource cannot be obtained right now. Other client errors point at
    /// configuration, other server errors at the translation itself.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND | StatusCode::SERVICE_UNAVAILABLE => {
                MtError::Unavailable(format!("({}): {}", status, body))
            }
            s if s.is_client_error() => {
                MtError::ConfigError(format!("API client error ({}): {}", status, body))
            }
            _ => MtError::TranslationError(format!("API server error ({}): {}", status, body)),
        }
    }
}

impl From<reqwest::Error> for MtError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            MtError::Unavailable(format!("Request failed: {}", e))
        } else if e.is_decode() {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        } else {
            MtError::Other(format!("HTTP error: {}", e))
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_unavailable() {
        let err = MtError::from_status(StatusCode::NOT_FOUND, "no such model");
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("no such model"));
    }

    #[test]
    fn test_service_unavailable_is_unavailable() {
        assert!(MtError::from_status(StatusCode::SERVICE_UNAVAILABLE, "loading").is_unavailable());
    }

    #[test]
    fn test_client_errors_are_config() {
        assert!(matches!(
            MtError::from_status(StatusCode::UNAUTHORIZED, "bad token"),
            MtError::ConfigError(_)
        ));
        assert!(matches!(
            MtError::from_status(StatusCode::BAD_REQUEST, ""),
            MtError::ConfigError(_)
        ));
    }

    #[test]
    fn test_server_errors_are_translation() {
        assert!(matches!(
            MtError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            MtError::TranslationError(_)
        ));
    }

    #[test]
    fn test_unsupported_pair_display() {
        let err = MtError::UnsupportedPair {
            backend: "Marian".to_string(),
            from: "en".to_string(),
            to: "ko".to_string(),
        };
        assert_eq!(err.to_string(), "Marian does not support en->ko");
        assert!(!err.is_unavailable());
    }
}
