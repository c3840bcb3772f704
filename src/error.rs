//! Error types for the department dispatcher

use thiserror::Error;

/// Result type alias for dispatcher operations
pub type Result<T> = std::result::Result<T, OrchestrationError>;

#[derive(Error, Debug)]
pub enum OrchestrationError {

    // =============================
    // Turn Pipeline Errors
    // =============================

    /// Completion provider or auxiliary tool failed, timed out, or
    /// could not be coerced into the requested label set.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The conversation has no user message where one is required.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Wiring or configuration is inconsistent. Raised at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of an [`OrchestrationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Upstream,
    Precondition,
    Configuration,
    Io,
}

impl OrchestrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrchestrationError::Upstream(_) | OrchestrationError::HttpError(_) => {
                ErrorKind::Upstream
            }
            OrchestrationError::Precondition(_) => ErrorKind::Precondition,
            OrchestrationError::Configuration(_) => ErrorKind::Configuration,
            OrchestrationError::IoError(_) => ErrorKind::Io,
        }
    }

    pub fn is_upstream(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            OrchestrationError::Upstream("timeout".into()).kind(),
            ErrorKind::Upstream
        );
        assert_eq!(
            OrchestrationError::Precondition("no user message".into()).kind(),
            ErrorKind::Precondition
        );
        assert_eq!(
            OrchestrationError::Configuration("missing handler".into()).kind(),
            ErrorKind::Configuration
        );

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        assert_eq!(OrchestrationError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_display_carries_detail() {
        let err = OrchestrationError::Upstream("Gemini API error: 503".into());
        assert_eq!(err.to_string(), "Upstream error: Gemini API error: 503");
        assert!(err.is_upstream());
    }
}
