//! Implementation of the `netscaff check` command.

use tracing::instrument;

use netscaff_core::{application::ValidationReport, domain::DomainValidator};

use crate::{
    cli::{CheckArgs, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Validate a request file and list every problem found.
#[instrument(skip_all, fields(request = %args.request.display()))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let request = super::read_request(&args.request)?;
    let report = ValidationReport::from_violations(&DomainValidator::violations(&request));

    if output.format() == OutputFormat::Json {
        output.json(&report)?;
    } else if report.success {
        output.success(&format!(
            "{}: {} ({} entities)",
            args.request.display(),
            report.message,
            request.entities.len()
        ))?;
    } else {
        for error in &report.errors {
            output.error(error)?;
        }
    }

    if report.success {
        Ok(())
    } else {
        Err(CliError::InvalidInput {
            message: report.message,
            source: None,
        })
    }
}
