use crate::application::report::StepResult;
use crate::domain::TemplateKey;

use super::GenerationContext;

/// ORM context and the infrastructure service registration. Both files
/// carry the marker regions [`super::DependencyRegistrar`] patches.
pub struct InfrastructureGenerator;

impl InfrastructureGenerator {
    pub fn generate(ctx: &GenerationContext<'_>) -> StepResult {
        StepResult::capture("Infrastructure", || {
            let layout = ctx.layout();
            let view = ctx.project_view();
            let mut files = Vec::with_capacity(2);
            for (key, path) in [
                (TemplateKey::DbContext, layout.db_context_file()),
                (
                    TemplateKey::InfrastructureDependencyInjection,
                    layout.infrastructure_di_file(),
                ),
            ] {
                let data = ctx.data(key, &view)?;
                files.push(ctx.render_to(key, &data, &path)?);
            }
            Ok(files)
        })
    }
}
