//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `netscaff-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::TemplateKey;
use crate::error::ScaffResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `netscaff_adapters::filesystem::LocalFilesystem` (production)
/// - `netscaff_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ScaffResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ScaffResult<()>;

    /// Read a UTF-8 file.
    fn read_file(&self, path: &Path) -> ScaffResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ScaffResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ScaffResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `netscaff_adapters::renderer::HandlebarsRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the template identified by `key` against `data`.
    fn render(&self, key: TemplateKey, data: &serde_json::Value) -> ScaffResult<String>;
}

/// One SDK command line (arguments only; the executable belongs to the adapter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkInvocation {
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl SdkInvocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// `true` when the arguments start with `prefix`.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len() && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }

    /// Value following `flag`, e.g. `value_of("--output")`.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for SdkInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dotnet")?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of an SDK command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl SdkOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for the SDK command line.
///
/// Implemented by:
/// - `netscaff_adapters::sdk::DotnetCli` (spawns the real executable)
/// - `netscaff_adapters::sdk::ScriptedSdk` (materialises the same files, no process)
///
/// A missing executable is `ApplicationError::SdkUnavailable`; a command
/// that ran and failed is an `Ok` output with a non-zero code.
#[cfg_attr(test, mockall::automock)]
pub trait SdkCli: Send + Sync {
    /// Executable name or path, for status reports.
    fn executable(&self) -> String;

    fn run(&self, invocation: &SdkInvocation) -> ScaffResult<SdkOutput>;
}

/// What an archiver produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: u64,
}

/// Port for packaging a directory tree.
///
/// Implemented by:
/// - `netscaff_adapters::archive::ZipArchiver`
#[cfg_attr(test, mockall::automock)]
pub trait Archiver: Send + Sync {
    /// Archive `source` into `destination`. Entries are prefixed with the
    /// source directory's name.
    fn archive(&self, source: &Path, destination: &Path) -> ScaffResult<ArchiveSummary>;
}
