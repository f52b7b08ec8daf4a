//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases
//! and help text. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "netscaff",
    bin_name = "netscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered .NET solution scaffolding",
    long_about = "netscaff turns a JSON description of entities into a layered \
                  .NET solution: entities, CQRS commands and handlers, \
                  repositories, controllers and dependency registration.",
    after_help = "EXAMPLES:\n\
        \x20 netscaff serve --port 5050\n\
        \x20 netscaff check shop.json\n\
        \x20 netscaff new shop.json --output ./out\n\
        \x20 netscaff new shop.json --zip Shop.zip --offline\n\
        \x20 netscaff sdk",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    #[command(
        about = "Run the HTTP server",
        after_help = "EXAMPLES:\n\
            \x20 netscaff serve\n\
            \x20 netscaff serve --host 0.0.0.0 --port 8080\n\
            \x20 netscaff serve --dev-endpoints --offline"
    )]
    Serve(ServeArgs),

    /// Scaffold a solution from a request file.
    #[command(
        visible_alias = "n",
        about = "Scaffold a solution locally",
        after_help = "EXAMPLES:\n\
            \x20 netscaff new shop.json\n\
            \x20 netscaff new shop.json --output ./out --force\n\
            \x20 netscaff new shop.json --zip ./Shop.zip"
    )]
    New(NewArgs),

    /// Validate a request file without generating anything.
    #[command(
        about = "Validate a request file",
        after_help = "EXAMPLES:\n\
            \x20 netscaff check shop.json\n\
            \x20 netscaff check shop.json --output-format json"
    )]
    Check(CheckArgs),

    /// Report whether the .NET SDK is usable.
    #[command(about = "Show .NET SDK status")]
    Sdk,
}

// ── serve ─────────────────────────────────────────────────────────────────────

/// Arguments for `netscaff serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address; overrides `server.host`.
    #[arg(long = "host", value_name = "HOST", help = "Address to bind")]
    pub host: Option<String>,

    /// Listen port; overrides `server.port`.
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Port to bind")]
    pub port: Option<u16>,

    /// Mount the `/api/dev/*` routes.
    #[arg(
        long = "dev-endpoints",
        help = "Enable development routes that write into outputPath"
    )]
    pub dev_endpoints: bool,

    /// Replace the `dotnet` executable with a built-in simulation.
    #[arg(long = "offline", help = "Simulate the .NET SDK instead of running dotnet")]
    pub offline: bool,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `netscaff new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Path to a JSON scaffold request.
    #[arg(value_name = "REQUEST", help = "JSON request file")]
    pub request: PathBuf,

    /// Parent directory of the solution; overrides `project.outputPath`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: outputPath or current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Also pack the solution into a zip archive.
    #[arg(long = "zip", value_name = "FILE", help = "Write a zip archive of the solution")]
    pub zip: Option<PathBuf>,

    /// Regenerate over an existing solution.
    #[arg(long = "force", help = "Overwrite generated files in an existing solution")]
    pub force: bool,

    /// Replace the `dotnet` executable with a built-in simulation.
    #[arg(long = "offline", help = "Simulate the .NET SDK instead of running dotnet")]
    pub offline: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `netscaff check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to a JSON scaffold request.
    #[arg(value_name = "REQUEST", help = "JSON request file")]
    pub request: PathBuf,
}

// ── tests ─────────────────────────────────────────────────────────────────────
