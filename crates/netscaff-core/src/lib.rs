//! netscaff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for netscaff,
//! a generator of layered .NET solutions, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     netscaff-server (HTTP + CLI)        │
//! │     (Drives the application)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, SdkService,         │
//! │    generators, bootstrapper)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateRenderer, SdkCli,  │
//! │  Archiver)                              │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   netscaff-adapters (Infrastructure)    │
//! │ (LocalFilesystem, HandlebarsRenderer,   │
//! │  DotnetCli, ZipArchiver, ...)           │
//! └─────────────────────────────────────────┘
//!
//!        Domain Layer (Pure Logic): requests, validation, layout,
//!        render views, marker-region patching
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use netscaff_core::prelude::*;
//!
//! let request: ScaffoldRequest = serde_json::from_str(json)?;
//! let service = ScaffoldService::new(filesystem, renderer, sdk, archiver);
//! let report = service.scaffold(&request, "./out")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArchivedProject, GeneratorKind, ScaffoldReport, ScaffoldService, SdkService, SdkStatus,
        StepResult, ValidationReport,
        ports::{Archiver, Filesystem, SdkCli, SdkInvocation, SdkOutput, TemplateRenderer},
    };
    pub use crate::domain::{
        EntityDefinition, EntityRequest, ProjectOptions, ProjectTemplate, PropertyDefinition,
        ScaffoldRequest, SolutionLayout, TargetFramework, TemplateKey,
    };
    pub use crate::error::{ErrorCategory, ScaffError, ScaffResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
