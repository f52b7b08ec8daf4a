//! Unified error handling for netscaff core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a category used by both front ends (HTTP status, exit code)
//! and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for netscaff core operations.
#[derive(Debug, Error, Clone)]
pub enum ScaffError {
    /// Errors from the domain layer (request violations, patching).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ScaffError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your config file and NETSCAFF__* environment variables".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in netscaff".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display and status mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Short message for API clients: the innermost error without the
    /// layer prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::Application(e) => e.to_string(),
            Self::Configuration { message } | Self::Internal { message } => message.clone(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::LockPoisoned { .. })
                | Self::Application(ApplicationError::SdkCommandFailed { .. })
        )
    }
}

/// Error categories for UI display and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input: HTTP 400, exit code 2.
    Validation,
    /// HTTP 404, exit code 3.
    NotFound,
    /// Target already exists: HTTP 409, exit code 2.
    Conflict,
    /// The SDK ran but failed: HTTP 502, exit code 5.
    External,
    /// The SDK is not installed: HTTP 503, exit code 5.
    Unavailable,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ScaffResult<T> = Result<T, ScaffError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> ScaffResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ScaffResult<T> {
        self.map_err(|e| ScaffError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
