//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the request
//! 2. Create the solution skeleton through the SDK
//! 3. Render shared and per-entity files
//! 4. Patch registration lines
//! 5. Optionally archive the result
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Archiver, Filesystem, SdkCli, TemplateRenderer},
        report::{ArchivedProject, ScaffoldReport, StepResult, ValidationReport},
        services::{
            bootstrap::SolutionBootstrapper,
            generators::{
                ApiGenerator, ApplicationGenerator, CommandGenerator, DependencyRegistrar,
                EntityGenerator, GenerationContext, GeneratorKind, HandlerGenerator,
                InfrastructureGenerator, RepositoryGenerator,
            },
        },
    },
    domain::{DomainError, DomainValidator, EntityRequest, ScaffoldRequest, SolutionLayout},
    error::ScaffResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    sdk: Box<dyn SdkCli>,
    archiver: Box<dyn Archiver>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use netscaff_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(filesystem), // impl Filesystem
    ///     Box::new(renderer),   // impl TemplateRenderer
    ///     Box::new(sdk),        // impl SdkCli
    ///     Box::new(archiver),   // impl Archiver
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        sdk: Box<dyn SdkCli>,
        archiver: Box<dyn Archiver>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            sdk,
            archiver,
        }
    }

    /// Collect every violation without touching the disk.
    pub fn validate(&self, request: &ScaffoldRequest) -> ValidationReport {
        ValidationReport::from_violations(&DomainValidator::violations(request))
    }

    /// Scaffold a full solution under `parent` (the solution directory is
    /// `parent/{name}`).
    ///
    /// Validation, an existing solution directory and SDK failures abort;
    /// generator failures are recorded in the report and the remaining
    /// steps still run.
    #[instrument(
        skip_all,
        fields(
            project = %request.project.name,
            template = %request.project.template,
            entities = request.entities.len(),
            parent = %parent.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        request: &ScaffoldRequest,
        parent: impl AsRef<Path>,
    ) -> ScaffResult<ScaffoldReport> {
        let options = &request.project;

        // 1. Validate
        DomainValidator::validate_request(request).map_err(validation_failed)?;

        // 2. Refuse to clobber an existing solution
        let layout = SolutionLayout::new(options, parent);
        if self.filesystem.exists(layout.root()) && !options.force {
            return Err(ApplicationError::ProjectExists {
                path: layout.root().to_path_buf(),
            }
            .into());
        }

        let mut report = ScaffoldReport::new(&options.name, layout.root());

        // 3. Skeleton
        let bootstrap = SolutionBootstrapper::new(self.sdk.as_ref(), self.filesystem.as_ref());
        report.push(bootstrap.bootstrap(&layout, options)?);

        // 4. Shared files
        let ctx = self.context(request, &layout);
        if request.entities.iter().any(|e| e.inherits_base) {
            report.push(EntityGenerator::base_entity(&ctx));
        }
        report.push(RepositoryGenerator::shared(&ctx));
        report.push(InfrastructureGenerator::generate(&ctx));
        report.push(ApplicationGenerator::generate(&ctx));
        report.push(ApiGenerator::program(&ctx));
        report.push(ApiGenerator::remove_samples(&ctx));

        // 5. Per entity
        for entity in &request.entities {
            let view = ctx.entity_view(entity);
            report.push(EntityGenerator::entity(&ctx, &view));
            report.push(CommandGenerator::generate(&ctx, &view));
            report.push(HandlerGenerator::generate(&ctx, &view));
            report.push(RepositoryGenerator::entity(&ctx, &view));
            report.push(ApiGenerator::controller(&ctx, &view));
            report.push(DependencyRegistrar::register(&ctx, &view));
        }

        if report.success {
            info!(files = report.file_count(), "Scaffold completed successfully");
        } else {
            warn!(
                failed = report.failed_steps().count(),
                "Scaffold completed with failed steps"
            );
        }
        Ok(report)
    }

    /// Scaffold into `workdir` and pack the solution into
    /// `workdir/{name}.zip`.
    #[instrument(skip_all, fields(project = %request.project.name))]
    pub fn scaffold_archive(
        &self,
        request: &ScaffoldRequest,
        workdir: impl AsRef<Path>,
    ) -> ScaffResult<ArchivedProject> {
        let workdir = workdir.as_ref();
        let report = self.scaffold(request, workdir)?;

        let file_name = format!("{}.zip", request.project.name);
        let archive = self
            .archiver
            .archive(&report.solution_dir, &workdir.join(&file_name))?;
        info!(entries = archive.entries, bytes = archive.bytes, "Archive written");

        Ok(ArchivedProject {
            report,
            archive,
            file_name,
        })
    }

    /// Run one generator against an existing solution at
    /// `project.outputPath/project.name`.
    #[instrument(skip_all, fields(kind = %kind, entity = %request.entity.name))]
    pub fn generate(&self, kind: GeneratorKind, request: &EntityRequest) -> ScaffResult<StepResult> {
        DomainValidator::validate_entity_request(request).map_err(validation_failed)?;

        let parent = request
            .project
            .output_path
            .clone()
            .ok_or(DomainError::MissingRequiredField {
                field: "project.outputPath",
            })?;
        let layout = SolutionLayout::new(&request.project, &parent);
        if !self.filesystem.exists(layout.root()) {
            return Err(ApplicationError::SolutionNotFound {
                path: layout.root().to_path_buf(),
            }
            .into());
        }

        let ctx = GenerationContext::new(
            &request.project,
            &layout,
            self.filesystem.as_ref(),
            self.renderer.as_ref(),
        )
        .with_entities(std::slice::from_ref(&request.entity));
        let view = ctx.entity_view(&request.entity);

        let steps = match kind {
            GeneratorKind::Entity => {
                let mut steps = Vec::new();
                if request.entity.inherits_base {
                    steps.push(EntityGenerator::base_entity(&ctx));
                }
                steps.push(EntityGenerator::entity(&ctx, &view));
                steps
            }
            GeneratorKind::Command => vec![CommandGenerator::generate(&ctx, &view)],
            GeneratorKind::Handler => vec![HandlerGenerator::generate(&ctx, &view)],
            GeneratorKind::Repository => vec![
                RepositoryGenerator::shared(&ctx),
                RepositoryGenerator::entity(&ctx, &view),
                DependencyRegistrar::register(&ctx, &view),
            ],
        };

        Ok(StepResult::merge(format!("{} {}", kind, view.entity), steps))
    }

    /// Where a request's solution would be written by the CLI and the
    /// development routes.
    pub fn solution_dir(request: &ScaffoldRequest, default_parent: &Path) -> PathBuf {
        let parent = request
            .project
            .output_path
            .clone()
            .unwrap_or_else(|| default_parent.to_path_buf());
        parent.join(&request.project.name)
    }

    fn context<'a>(
        &'a self,
        request: &'a ScaffoldRequest,
        layout: &'a SolutionLayout,
    ) -> GenerationContext<'a> {
        GenerationContext::new(
            &request.project,
            layout,
            self.filesystem.as_ref(),
            self.renderer.as_ref(),
        )
        .with_entities(&request.entities)
    }
}

fn validation_failed(errors: Vec<DomainError>) -> ApplicationError {
    ApplicationError::ValidationFailed(errors.iter().map(ToString::to_string).collect())
}
