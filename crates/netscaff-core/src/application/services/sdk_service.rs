//! SDK Service - reports whether the SDK is usable.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{SdkCli, SdkInvocation},
    },
    error::{ScaffError, ScaffResult},
};

/// Installation status of the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkStatus {
    pub installed: bool,
    pub executable: String,
    pub version: Option<String>,
    /// One entry per installed SDK, e.g. `8.0.100 [/usr/share/dotnet/sdk]`.
    pub sdks: Vec<String>,
}

/// Service for SDK queries.
pub struct SdkService {
    sdk: Box<dyn SdkCli>,
}

impl SdkService {
    pub fn new(sdk: Box<dyn SdkCli>) -> Self {
        Self { sdk }
    }

    /// Query `--version` and `--list-sdks`.
    ///
    /// A missing executable yields `installed: false`; other failures are
    /// errors.
    #[instrument(skip_all)]
    pub fn status(&self) -> ScaffResult<SdkStatus> {
        let executable = self.sdk.executable();

        let version = match self.sdk.run(&SdkInvocation::new(["--version"])) {
            Ok(output) if output.is_success() => output.stdout.trim().to_string(),
            Ok(output) => {
                return Err(ApplicationError::SdkCommandFailed {
                    command: "dotnet --version".into(),
                    status: output.code,
                    stderr: output.stderr.trim().to_string(),
                }
                .into());
            }
            Err(ScaffError::Application(ApplicationError::SdkUnavailable { .. })) => {
                debug!(executable = %executable, "SDK not found");
                return Ok(SdkStatus {
                    installed: false,
                    executable,
                    version: None,
                    sdks: Vec::new(),
                });
            }
            Err(e) => return Err(e),
        };

        let sdks = match self.sdk.run(&SdkInvocation::new(["--list-sdks"])) {
            Ok(output) if output.is_success() => output
                .stdout
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };

        Ok(SdkStatus {
            installed: true,
            executable,
            version: Some(version),
            sdks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockSdkCli, SdkOutput};

    fn sdk() -> MockSdkCli {
        let mut sdk = MockSdkCli::new();
        sdk.expect_executable().return_const("dotnet".to_string());
        sdk
    }

    #[test]
    fn reports_version_and_sdks() {
        let mut sdk = sdk();
        sdk.expect_run()
            .withf(|inv| inv.args == ["--version"])
            .returning(|_| Ok(SdkOutput::success("8.0.100\n")));
        sdk.expect_run()
            .withf(|inv| inv.args == ["--list-sdks"])
            .returning(|_| {
                Ok(SdkOutput::success(
                    "7.0.410 [/usr/share/dotnet/sdk]\n8.0.100 [/usr/share/dotnet/sdk]\n",
                ))
            });

        let status = SdkService::new(Box::new(sdk)).status().unwrap();

        assert!(status.installed);
        assert_eq!(status.version.as_deref(), Some("8.0.100"));
        assert_eq!(status.sdks.len(), 2);
    }

    #[test]
    fn missing_sdk_is_not_an_error() {
        let mut sdk = sdk();
        sdk.expect_run().returning(|_| {
            Err(ApplicationError::SdkUnavailable {
                executable: "dotnet".into(),
            }
            .into())
        });

        let status = SdkService::new(Box::new(sdk)).status().unwrap();

        assert!(!status.installed);
        assert!(status.version.is_none());
    }
}
