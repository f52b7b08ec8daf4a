//! Application layer for netscaff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, SdkService, generators)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Reports**: What the use cases hand back to clients
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

// Re-export main services
pub use services::{GeneratorKind, ScaffoldService, SdkService, SdkStatus};

// Re-export port traits (for adapter implementation)
pub use ports::{Archiver, Filesystem, SdkCli, TemplateRenderer};

pub use error::ApplicationError;
pub use report::{
    ArchivedProject, FileOutcome, GeneratedFile, ScaffoldReport, StepResult, ValidationReport,
};
