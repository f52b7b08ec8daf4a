use std::path::PathBuf;

use crate::application::report::StepResult;
use crate::domain::{EntityView, SolutionLayout, TemplateKey};

use super::GenerationContext;

/// CQRS requests: create/update/delete commands and the two read queries.
pub struct CommandGenerator;

impl CommandGenerator {
    pub fn generate(ctx: &GenerationContext<'_>, view: &EntityView) -> StepResult {
        StepResult::capture(format!("Commands {}", view.entity), || {
            let mut files = Vec::new();
            for (key, path) in Self::targets(ctx.layout(), view) {
                let data = ctx.data(key, view)?;
                files.push(ctx.render_to(key, &data, &path)?);
            }
            Ok(files)
        })
    }

    /// Template and destination of every request type for an entity.
    pub fn targets(layout: &SolutionLayout, view: &EntityView) -> Vec<(TemplateKey, PathBuf)> {
        let entity = &view.entity;
        let commands = layout.commands(entity).dir;
        let queries = layout.queries(entity).dir;
        vec![
            (
                TemplateKey::CreateCommand,
                commands.join(format!("Create{entity}Command.cs")),
            ),
            (
                TemplateKey::UpdateCommand,
                commands.join(format!("Update{entity}Command.cs")),
            ),
            (
                TemplateKey::DeleteCommand,
                commands.join(format!("Delete{entity}Command.cs")),
            ),
            (
                TemplateKey::GetByIdQuery,
                queries.join(format!("Get{entity}ByIdQuery.cs")),
            ),
            (
                TemplateKey::GetAllQuery,
                queries.join(format!("GetAll{}Query.cs", view.plural)),
            ),
        ]
    }
}
