//! Infrastructure adapters for netscaff.
//!
//! This crate implements the ports defined in
//! `netscaff_core::application::ports`. It holds every external dependency:
//! the filesystem, Handlebars, the `dotnet` process and zip packaging.

pub mod archive;
pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod sdk;

// Re-export commonly used adapters
pub use archive::ZipArchiver;
pub use builtin_templates::TemplateSources;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{HandlebarsRenderer, TemplateCache};
pub use sdk::{DotnetCli, ScriptedSdk};
