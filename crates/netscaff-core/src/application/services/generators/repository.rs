use crate::application::report::StepResult;
use crate::domain::{EntityView, TemplateKey};

use super::GenerationContext;

/// Repository abstractions (Application) and their EF Core implementations
/// (Infrastructure).
pub struct RepositoryGenerator;

impl RepositoryGenerator {
    /// Generic `IRepository<T>` and `Repository<T>`.
    pub fn shared(ctx: &GenerationContext<'_>) -> StepResult {
        StepResult::capture("Repository<T>", || {
            let layout = ctx.layout();
            let view = ctx.project_view();
            let mut files = Vec::with_capacity(2);
            for (key, path) in [
                (
                    TemplateKey::GenericRepositoryInterface,
                    layout.generic_repository_interface_file(),
                ),
                (TemplateKey::GenericRepository, layout.generic_repository_file()),
            ] {
                let data = ctx.data(key, &view)?;
                files.push(ctx.render_to(key, &data, &path)?);
            }
            Ok(files)
        })
    }

    /// `I{Entity}Repository` and `{Entity}Repository`.
    pub fn entity(ctx: &GenerationContext<'_>, view: &EntityView) -> StepResult {
        StepResult::capture(format!("Repository {}", view.entity), || {
            let layout = ctx.layout();
            let data = ctx.data(TemplateKey::Repository, view)?;
            Ok(vec![
                ctx.render_to(
                    TemplateKey::RepositoryInterface,
                    &data,
                    &layout.repository_interface_file(&view.entity),
                )?,
                ctx.render_to(
                    TemplateKey::Repository,
                    &data,
                    &layout.repository_file(&view.entity),
                )?,
            ])
        })
    }
}
