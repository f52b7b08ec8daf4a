//! Implementation of the `netscaff sdk` command.

use tracing::instrument;

use netscaff_adapters::DotnetCli;
use netscaff_core::application::{ApplicationError, SdkService};

use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Print `dotnet --version` and `--list-sdks`. A missing SDK exits with
/// the external-tool code after printing the status.
#[instrument(skip_all)]
pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = SdkService::new(Box::new(DotnetCli::new(config.sdk.executable.clone())));
    let status = service.status().with_cli_context(|| "querying the .NET SDK")?;

    if output.format() == OutputFormat::Json {
        output.json(&status)?;
    } else if status.installed {
        output.success(&format!(
            ".NET SDK {} ({})",
            status.version.as_deref().unwrap_or("unknown"),
            status.executable
        ))?;
        for sdk in &status.sdks {
            output.print(&format!("  {sdk}"))?;
        }
    } else {
        output.warning(&format!("'{}' was not found", status.executable))?;
    }

    if status.installed {
        Ok(())
    } else {
        Err(CliError::Core(
            ApplicationError::SdkUnavailable {
                executable: status.executable,
            }
            .into(),
        ))
    }
}
