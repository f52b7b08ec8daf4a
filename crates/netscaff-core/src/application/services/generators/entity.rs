use crate::application::report::StepResult;
use crate::domain::{EntityView, TemplateKey};

use super::GenerationContext;

/// Domain layer: `BaseEntity` and one class per entity.
pub struct EntityGenerator;

impl EntityGenerator {
    /// `Common/BaseEntity.cs`, shared by every entity with `inheritsBase`.
    pub fn base_entity(ctx: &GenerationContext<'_>) -> StepResult {
        StepResult::capture("BaseEntity", || {
            let key = TemplateKey::BaseEntity;
            let data = ctx.data(key, &ctx.project_view())?;
            Ok(vec![ctx.render_to(key, &data, &ctx.layout().base_entity_file())?])
        })
    }

    /// `Entities/{Entity}.cs`.
    pub fn entity(ctx: &GenerationContext<'_>, view: &EntityView) -> StepResult {
        StepResult::capture(format!("Entity {}", view.entity), || {
            let key = TemplateKey::Entity;
            let data = ctx.data(key, view)?;
            Ok(vec![ctx.render_to(key, &data, &ctx.layout().entity_file(&view.entity))?])
        })
    }
}
