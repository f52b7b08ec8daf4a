//! Solution skeleton creation through the SDK command line.

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SdkCli, SdkInvocation},
        report::{FileOutcome, GeneratedFile, StepResult},
    },
    domain::{ProjectOptions, SolutionLayout},
    error::ScaffResult,
};

/// Creates the solution, its projects and their references.
pub struct SolutionBootstrapper<'a> {
    sdk: &'a dyn SdkCli,
    filesystem: &'a dyn Filesystem,
}

impl<'a> SolutionBootstrapper<'a> {
    pub fn new(sdk: &'a dyn SdkCli, filesystem: &'a dyn Filesystem) -> Self {
        Self { sdk, filesystem }
    }

    /// Every SDK command for a layout, in execution order.
    pub fn invocations(layout: &SolutionLayout, options: &ProjectOptions) -> Vec<SdkInvocation> {
        let root = layout.root().display().to_string();
        let solution = layout.solution_file().display().to_string();
        let projects = layout.projects();

        let mut sln = vec![
            "new".to_string(),
            "sln".into(),
            "--name".into(),
            layout.name().to_string(),
            "--output".into(),
            root,
        ];
        if options.force {
            sln.push("--force".into());
        }
        let mut commands = vec![SdkInvocation::new(sln)];

        for project in &projects {
            let mut args = vec![
                "new".to_string(),
                project.sdk_template.into(),
                "--name".into(),
                project.name.clone(),
                "--output".into(),
                project.dir.display().to_string(),
                "--framework".into(),
                options.framework.to_string(),
                "--no-restore".into(),
            ];
            if options.force {
                args.push("--force".into());
            }
            commands.push(SdkInvocation::new(args));
        }

        for project in &projects {
            commands.push(SdkInvocation::new([
                "sln".to_string(),
                solution.clone(),
                "add".into(),
                project.csproj().display().to_string(),
            ]));
        }

        for (from, to) in layout.references() {
            commands.push(SdkInvocation::new([
                "add".to_string(),
                from.csproj().display().to_string(),
                "reference".into(),
                to.csproj().display().to_string(),
            ]));
        }

        commands
    }

    /// Run every command; the first failure aborts.
    #[instrument(skip_all, fields(solution = %layout.name(), template = %options.template))]
    pub fn bootstrap(
        &self,
        layout: &SolutionLayout,
        options: &ProjectOptions,
    ) -> ScaffResult<StepResult> {
        if let Some(parent) = layout.root().parent() {
            self.filesystem.create_dir_all(parent)?;
        }

        // Outcomes are decided before the SDK runs: afterwards every file exists.
        let mut paths = vec![layout.solution_file()];
        paths.extend(layout.projects().iter().map(|p| p.csproj()));
        let files: Vec<GeneratedFile> = paths
            .iter()
            .map(|path| {
                let outcome = if self.filesystem.exists(path) {
                    FileOutcome::Overwritten
                } else {
                    FileOutcome::Created
                };
                GeneratedFile::new(relative(layout, path), outcome)
            })
            .collect();

        let commands = Self::invocations(layout, options);
        for invocation in &commands {
            self.run(invocation)?;
        }
        info!(commands = commands.len(), "Solution skeleton created");

        Ok(StepResult::succeeded(format!("Solution {}", layout.name()), files))
    }

    fn run(&self, invocation: &SdkInvocation) -> ScaffResult<()> {
        let output = self.sdk.run(invocation)?;
        if output.is_success() {
            return Ok(());
        }

        let stderr = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        Err(ApplicationError::SdkCommandFailed {
            command: invocation.to_string(),
            status: output.code,
            stderr,
        }
        .into())
    }
}

fn relative(layout: &SolutionLayout, path: &std::path::Path) -> std::path::PathBuf {
    path.strip_prefix(layout.root())
        .map_or_else(|_| path.to_path_buf(), std::path::Path::to_path_buf)
}
