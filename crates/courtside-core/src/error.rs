//! Error types for Courtside

use thiserror::Error;

/// Message shown when a failure carries nothing the user can act on.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Main error type for Courtside client operations
#[derive(Error, Debug)]
pub enum CourtsideError {
    /// The data backend rejected a query or mutation
    #[error("Backend error: {0}")]
    Backend(String),

    /// Transport-level failure talking to the backend or upload endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// A flow received an event that is not valid in its current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// The platform refused a permission (camera, media library)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Export request could not be turned into a URL
    #[error("Invalid export: {0}")]
    InvalidExport(String),

    /// Image upload failed after the upload URL was obtained
    #[error("Upload error: {0}")]
    Upload(String),

    /// Configuration could not be read or is malformed
    #[error("Config error: {0}")]
    Config(String),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Entity was not found by the backend
    #[error("Not found: {0}")]
    NotFound(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourtsideError {
    /// Text suitable for an alert.
    ///
    /// Backend errors carry the server-provided message; permission denials
    /// explain themselves. Everything else collapses to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            CourtsideError::Backend(msg) if !msg.trim().is_empty() => msg.clone(),
            CourtsideError::PermissionDenied(what) => {
                format!("Permission to access the {} was denied.", what)
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for CourtsideError {
    fn from(err: serde_json::Error) -> Self {
        CourtsideError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for CourtsideError {
    fn from(err: reqwest::Error) -> Self {
        CourtsideError::Network(err.to_string())
    }
}

impl From<url::ParseError> for CourtsideError {
    fn from(err: url::ParseError) -> Self {
        CourtsideError::InvalidExport(err.to_string())
    }
}

/// Result type alias using CourtsideError
pub type CourtsideResult<T> = Result<T, CourtsideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CourtsideError::InvalidTransition("sequence complete".to_string());
        assert_eq!(format!("{}", err), "Invalid transition: sequence complete");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CourtsideError = io_err.into();
        assert!(matches!(err, CourtsideError::Io(_)));
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = CourtsideError::Backend("Game is already completed".to_string());
        assert_eq!(err.user_message(), "Game is already completed");
    }

    #[test]
    fn test_user_message_generic_fallback() {
        assert_eq!(
            CourtsideError::Network("timeout".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            CourtsideError::Backend("  ".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_user_message_permission() {
        let err = CourtsideError::PermissionDenied("media library".into());
        assert_eq!(
            err.user_message(),
            "Permission to access the media library was denied."
        );
    }
}
