//! Runs the real `dotnet` executable.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, instrument, warn};

use netscaff_core::{
    application::{
        ApplicationError,
        ports::{SdkCli, SdkInvocation, SdkOutput},
    },
    error::ScaffResult,
};

pub const DEFAULT_EXECUTABLE: &str = "dotnet";

/// Spawns the SDK once per invocation and captures its output.
#[derive(Debug, Clone)]
pub struct DotnetCli {
    executable: String,
}

impl DotnetCli {
    /// `executable` is a name looked up on `PATH` or a path to the binary.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Absolute path of the executable, if it can be found.
    pub fn resolve(&self) -> ScaffResult<PathBuf> {
        which::which(&self.executable).map_err(|e| {
            debug!(executable = %self.executable, error = %e, "SDK lookup failed");
            self.unavailable()
        })
    }

    fn unavailable(&self) -> netscaff_core::error::ScaffError {
        ApplicationError::SdkUnavailable {
            executable: self.executable.clone(),
        }
        .into()
    }
}

impl Default for DotnetCli {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE)
    }
}

impl SdkCli for DotnetCli {
    fn executable(&self) -> String {
        self.executable.clone()
    }

    #[instrument(skip_all, fields(command = %invocation))]
    fn run(&self, invocation: &SdkInvocation) -> ScaffResult<SdkOutput> {
        let program = self.resolve()?;

        let mut command = Command::new(&program);
        command
            .args(&invocation.args)
            .env("DOTNET_CLI_TELEMETRY_OPTOUT", "1")
            .env("DOTNET_NOLOGO", "1")
            .env("DOTNET_SKIP_FIRST_TIME_EXPERIENCE", "1")
            .stdin(Stdio::null());
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let started = Instant::now();
        let output = command.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => self.unavailable(),
            _ => ApplicationError::SdkCommandFailed {
                command: invocation.to_string(),
                status: None,
                stderr: e.to_string(),
            }
            .into(),
        })?;

        let result = SdkOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        if result.is_success() {
            debug!(elapsed_ms, "SDK command finished");
        } else {
            warn!(elapsed_ms, code = ?result.code, "SDK command failed");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscaff_core::error::ErrorCategory;

    #[test]
    fn missing_executable_is_unavailable() {
        let sdk = DotnetCli::new("netscaff-test-no-such-sdk");

        let err = sdk.run(&SdkInvocation::new(["--version"])).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Unavailable);
        assert!(err.user_message().contains("netscaff-test-no-such-sdk"));
    }

    #[cfg(unix)]
    #[test]
    fn captures_exit_code_and_streams() {
        let sdk = DotnetCli::new("sh");

        let output = sdk
            .run(&SdkInvocation::new(["-c", "echo out; echo err >&2; exit 3"]))
            .unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_the_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sdk = DotnetCli::new("sh");

        let output = sdk
            .run(&SdkInvocation::new(["-c", "pwd"]).in_dir(dir.path()))
            .unwrap();

        assert!(output.is_success());
        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }
}
