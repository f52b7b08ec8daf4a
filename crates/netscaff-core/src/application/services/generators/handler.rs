use std::path::PathBuf;

use crate::application::report::StepResult;
use crate::domain::{EntityView, SolutionLayout, TemplateKey};

use super::GenerationContext;

/// One MediatR handler per request type, next to the request it handles.
pub struct HandlerGenerator;

impl HandlerGenerator {
    pub fn generate(ctx: &GenerationContext<'_>, view: &EntityView) -> StepResult {
        StepResult::capture(format!("Handlers {}", view.entity), || {
            let data = ctx.data(TemplateKey::CreateHandler, view)?;
            Self::targets(ctx.layout(), view)
                .into_iter()
                .map(|(key, path)| ctx.render_to(key, &data, &path))
                .collect()
        })
    }

    pub fn targets(layout: &SolutionLayout, view: &EntityView) -> Vec<(TemplateKey, PathBuf)> {
        let entity = &view.entity;
        let commands = layout.commands(entity).dir;
        let queries = layout.queries(entity).dir;
        vec![
            (
                TemplateKey::CreateHandler,
                commands.join(format!("Create{entity}CommandHandler.cs")),
            ),
            (
                TemplateKey::UpdateHandler,
                commands.join(format!("Update{entity}CommandHandler.cs")),
            ),
            (
                TemplateKey::DeleteHandler,
                commands.join(format!("Delete{entity}CommandHandler.cs")),
            ),
            (
                TemplateKey::GetByIdHandler,
                queries.join(format!("Get{entity}ByIdQueryHandler.cs")),
            ),
            (
                TemplateKey::GetAllHandler,
                queries.join(format!("GetAll{}QueryHandler.cs", view.plural)),
            ),
        ]
    }
}
