//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `netscaff-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateRenderer`: Template rendering
//!   - `SdkCli`: The `dotnet` command line
//!   - `Archiver`: Packaging a generated tree
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The HTTP routes and CLI commands in `netscaff-server` call the services directly)

pub mod output;

pub use output::{
    ArchiveSummary, Archiver, Filesystem, SdkCli, SdkInvocation, SdkOutput, TemplateRenderer,
};

#[cfg(test)]
pub use output::{MockArchiver, MockSdkCli, MockTemplateRenderer};
