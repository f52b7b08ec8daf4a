//! Implementation of the `netscaff new` command.
//!
//! Responsibility: read the request file, apply CLI overrides, call the core
//! scaffold service and display results. No business logic lives here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use netscaff_adapters::ZipArchiver;
use netscaff_core::application::{Archiver, ScaffoldReport};

use crate::{
    cli::{NewArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    http::AppState,
    output::OutputManager,
};

/// Execute the `netscaff new` command.
///
/// Dispatch sequence:
/// 1. Parse the request file
/// 2. Apply `--force` / `--output`
/// 3. Scaffold via `ScaffoldService`
/// 4. Optionally pack the solution with `--zip`
/// 5. Print the report and next steps
#[instrument(skip_all, fields(request = %args.request.display()))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Parse
    let mut request = super::read_request(&args.request)?;

    // 2. Overrides
    if args.force {
        request.project.force = true;
    }
    let parent = args
        .output
        .clone()
        .or_else(|| request.project.output_path.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    debug!(
        project = %request.project.name,
        parent = %parent.display(),
        offline = args.offline,
        "Scaffolding locally"
    );

    // 3. Scaffold
    let service = AppState::new(config, args.offline).scaffold_service();
    let report = service
        .scaffold(&request, &parent)
        .with_cli_context(|| "scaffolding")?;
    output.report(&report)?;

    // 4. Archive
    if let Some(zip) = &args.zip {
        let summary = ZipArchiver::new()
            .archive(&report.solution_dir, zip)
            .with_cli_context(|| "archiving")?;
        info!(entries = summary.entries, bytes = summary.bytes, "Archive written");
        if output.format() != OutputFormat::Json {
            output.success(&format!(
                "Archived {} entries to {}",
                summary.entries,
                summary.path.display()
            ))?;
        }
    }

    // 5. Summary
    if output.format() != OutputFormat::Json {
        print_summary(&report, &output)?;
    }
    Ok(())
}

fn print_summary(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    let failed = report.failed_steps().count();
    if failed > 0 {
        output.warning(&format!(
            "{failed} step(s) failed; the rest of the solution was generated"
        ))?;
        return Ok(());
    }

    output.print("")?;
    output.success(&format!(
        "{} created with {} file(s)",
        report.project,
        report.file_count()
    ))?;
    output.info("Next steps:")?;
    output.print(&format!("  cd {}", report.solution_dir.display()))?;
    output.print("  dotnet build")?;
    Ok(())
}
