use crate::application::report::StepResult;
use crate::domain::TemplateKey;

use super::GenerationContext;

/// Application service registration (MediatR handlers of the assembly).
pub struct ApplicationGenerator;

impl ApplicationGenerator {
    pub fn generate(ctx: &GenerationContext<'_>) -> StepResult {
        StepResult::capture("Application", || {
            let key = TemplateKey::ApplicationDependencyInjection;
            let data = ctx.data(key, &ctx.project_view())?;
            Ok(vec![ctx.render_to(key, &data, &ctx.layout().application_di_file())?])
        })
    }
}
