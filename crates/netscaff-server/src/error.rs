//! Errors surfaced by the `netscaff` binary and their exit codes.
//!
//! Core failures arrive as [`ScaffError`] and keep their own suggestions;
//! everything else (bad request files, config, I/O, the listener) is
//! described here. [`CliError::exit_code`] is the single place that decides
//! how the process ends.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use netscaff_core::error::ScaffError;

pub use netscaff_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments or request content that cannot be used as given.
    #[error("{message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// The request file is not a JSON scaffold request.
    #[error("Invalid request file {path}: {message}")]
    InvalidRequest {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("{0}")]
    Core(#[from] ScaffError),

    /// `context` names what was being done, e.g. "reading shop.json".
    #[error("{context}: {source}")]
    IoError {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP listener could not bind or stopped with an error.
    #[error("Server error: {message}")]
    Server {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        CliError::IoError {
            context: "I/O error".into(),
            source,
        }
    }
}

impl CliError {
    /// What the user can try next. Core errors bring their own list.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec![
                "Fix the problems listed above and run the command again".into(),
                "See `netscaff <COMMAND> --help` for the accepted arguments".into(),
            ],
            Self::InvalidRequest { path, .. } => vec![
                format!("'{}' must be a JSON scaffold request", path.display()),
                "Required: project.name and at least one entity".into(),
                "Validate it first: netscaff check <REQUEST.json>".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check the config file at {} or the one given with --config",
                    crate::config::AppConfig::config_path().display()
                ),
                "Single keys can be overridden with NETSCAFF__SECTION__KEY variables".into(),
            ],
            Self::Core(core_err) => core_err.suggestions(),
            Self::IoError { .. } => vec![
                "Check that the path exists and is writable".into(),
                "Use --output to scaffold somewhere else".into(),
            ],
            Self::Server { .. } => vec![
                "Check that the port is free: --port or NETSCAFF__SERVER__PORT".into(),
                "Binding below 1024 usually needs elevated privileges".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidRequest { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => core.category().into(),
            Self::IoError { .. } | Self::Server { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit status for this error.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | .NET SDK      |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::External => 5,
        }
    }

    /// Report for a terminal: red headline, dimmed causes, yellow hints.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same report without ANSI escapes, for pipes and log files.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, colored: bool) -> String {
        let style = |text: &str, painted: String| {
            if colored { painted } else { text.to_string() }
        };

        let headline = self.to_string();
        let mut out = format!(
            "\n{} {}\n",
            style("Error:", "Error:".red().bold().to_string()),
            style(&headline, headline.red().to_string()),
        );

        if verbose {
            let label = style("Caused by:", "Caused by:".dimmed().to_string());
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!("  {label} {err}\n"));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let title = style("Suggestions:", "Suggestions:".yellow().bold().to_string());
            out.push_str(&format!("\n{title}\n"));
            for hint in &suggestions {
                out.push_str(&format!("  - {hint}\n"));
            }
        }

        if !verbose {
            let hint = "Run with -v / --verbose to see the underlying cause.";
            out.push_str(&format!("\n{}\n", style(hint, hint.dimmed().to_string())));
        }

        out
    }

    pub fn log(&self) {
        let code = self.exit_code();
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(code, "{self}")
            }
            _ => tracing::error!(code, category = ?self.category(), "{self}"),
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// Exit-code buckets. Several core categories collapse into one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Validation failures, bad arguments, an existing solution.
    UserError,
    NotFound,
    Configuration,
    /// The .NET SDK is missing or one of its commands failed.
    External,
    Internal,
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Conflict => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::External | CoreCategory::Unavailable => Self::External,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

/// Attaches a context message when lifting a foreign error into [`CliError`].
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            context: f().into(),
            source,
        })
    }
}

impl<T> IntoCli<T> for Result<T, ScaffError> {
    // Core errors already name the path or command that failed.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use netscaff_core::{application::ApplicationError, domain::DomainError};

    fn core(err: impl Into<ScaffError>) -> CliError {
        CliError::Core(err.into())
    }

    fn io_failure(context: &str) -> CliError {
        CliError::IoError {
            context: context.into(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        }
    }

    #[test]
    fn project_exists_suggests_force() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/Shop"),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("force")));
    }

    #[test]
    fn invalid_request_points_at_check() {
        let err = CliError::InvalidRequest {
            path: PathBuf::from("shop.json"),
            message: "expected value".into(),
            source: None,
        };
        assert!(err.suggestions().iter().any(|s| s.contains("netscaff check")));
    }

    #[test]
    fn validation_and_conflicts_exit_with_two() {
        let invalid = CliError::InvalidInput {
            message: "2 problems".into(),
            source: None,
        };
        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(core(DomainError::NoEntities).exit_code(), 2);
        assert_eq!(
            core(ApplicationError::ProjectExists {
                path: PathBuf::from("/tmp/Shop"),
            })
            .exit_code(),
            2
        );
    }

    #[test]
    fn missing_solution_exits_with_three() {
        let err = core(ApplicationError::SolutionNotFound {
            path: PathBuf::from("/work/Shop"),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn config_errors_exit_with_four() {
        let err = CliError::ConfigError {
            message: "port: invalid digit".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn sdk_failures_exit_with_five() {
        let missing = core(ApplicationError::SdkUnavailable {
            executable: "dotnet".into(),
        });
        let failed = core(ApplicationError::SdkCommandFailed {
            command: "dotnet new sln".into(),
            status: Some(1),
            stderr: "boom".into(),
        });
        assert_eq!(missing.exit_code(), 5);
        assert_eq!(failed.exit_code(), 5);
    }

    #[test]
    fn io_and_listener_failures_are_internal() {
        assert_eq!(io_failure("writing Shop.zip").exit_code(), 1);
        let server = CliError::Server {
            message: "address in use".into(),
            source: None,
        };
        assert_eq!(server.exit_code(), 1);
    }

    #[test]
    fn plain_report_has_headline_and_hints() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        });
        let s = err.format_plain(false);
        assert!(s.starts_with("\nError: "));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_report_lists_causes() {
        let s = io_failure("reading shop.json").format_plain(true);
        assert!(s.contains("Caused by: missing"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn io_context_prefixes_the_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.with_cli_context(|| "reading request").unwrap_err();
        assert_eq!(err.to_string(), "reading request: missing");
    }

    #[test]
    fn core_errors_pass_through_unchanged() {
        let result: Result<(), ScaffError> = Err(DomainError::NoEntities.into());
        let err = result.with_cli_context(|| "ignored").unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.to_string(), ScaffError::from(DomainError::NoEntities).to_string());
    }
}
