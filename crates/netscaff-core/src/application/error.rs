//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No template source exists for a key.
    #[error("Template not found: {key}")]
    TemplateNotFound { key: String },

    /// Template compilation or rendering failed.
    #[error("Rendering {template} failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A process-wide lock was poisoned by a panicking holder.
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: &'static str },

    /// Request validation failed; one message per violation.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// The SDK executable could not be found or started.
    #[error("SDK executable '{executable}' is not available")]
    SdkUnavailable { executable: String },

    /// An SDK command exited unsuccessfully.
    #[error("`{command}` failed ({}): {stderr}", exit_label(.status))]
    SdkCommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Packaging the generated tree failed.
    #[error("Archiving {path} failed: {reason}")]
    ArchiveFailed { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A generator targeted a solution that has not been scaffolded.
    #[error("No solution found at {path}")]
    SolutionNotFound { path: PathBuf },
}

fn exit_label(status: &Option<i32>) -> String {
    status.map_or_else(|| "terminated".to_string(), |c| format!("exit code {c}"))
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { key } => vec![
                format!("Missing template: {}", key),
                "Check templates.local_path or remove it to use the built-in set".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LockPoisoned { .. } => vec![
                "A previous request panicked while patching files".into(),
                "Restart the server".into(),
            ],
            Self::SdkUnavailable { executable } => vec![
                format!("Install the .NET SDK so that '{}' is on PATH", executable),
                "Or point sdk.executable at the dotnet binary".into(),
            ],
            Self::SdkCommandFailed { .. } => vec![
                "Run the command by hand to see the full output".into(),
                "Check that the requested framework is installed: dotnet --list-sdks".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Set \"force\": true to regenerate (overwrites generated files)".into(),
            ],
            Self::SolutionNotFound { .. } => vec![
                "Scaffold the solution first, then call the generator routes".into(),
                "Check project.outputPath and project.name".into(),
            ],
            Self::ValidationFailed(errors) => errors.clone(),
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::SolutionNotFound { .. } => ErrorCategory::NotFound,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockPoisoned { .. }
            | Self::ArchiveFailed { .. } => ErrorCategory::Internal,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::SdkUnavailable { .. } => ErrorCategory::Unavailable,
            Self::SdkCommandFailed { .. } => ErrorCategory::External,
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
        }
    }
}
