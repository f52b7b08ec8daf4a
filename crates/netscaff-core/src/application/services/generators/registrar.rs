//! Registration lines in the ORM context and the infrastructure DI file.

use std::path::Path;
use std::sync::Mutex;

use tracing::debug;

use crate::application::{
    ApplicationError,
    report::{FileOutcome, GeneratedFile, StepResult},
};
use crate::domain::{EntityView, MarkerRegion, PatchOutcome, insert_into_region};
use crate::error::ScaffResult;

use super::GenerationContext;

/// Serialises every read-modify-write of a patched file in the process.
static PATCH_LOCK: Mutex<()> = Mutex::new(());

/// Inserts `DbSet`, `using` and `AddScoped` lines for an entity.
///
/// Insertion is idempotent: running it again for the same entity leaves the
/// files unchanged.
pub struct DependencyRegistrar;

impl DependencyRegistrar {
    pub fn register(ctx: &GenerationContext<'_>, view: &EntityView) -> StepResult {
        StepResult::capture(format!("Registration {}", view.entity), || {
            let _guard = PATCH_LOCK.lock().map_err(|_| ApplicationError::LockPoisoned {
                resource: "registration patch lock",
            })?;

            let layout = ctx.layout();
            Ok(vec![
                Self::patch(ctx, &layout.db_context_file(), &Self::context_lines(view))?,
                Self::patch(
                    ctx,
                    &layout.infrastructure_di_file(),
                    &Self::service_lines(view),
                )?,
            ])
        })
    }

    /// Lines for `ApplicationDbContext.cs`. Entities sharing a namespace
    /// share one `using`.
    pub fn context_lines(view: &EntityView) -> Vec<(MarkerRegion, String)> {
        vec![
            (MarkerRegion::Usings, format!("using {};", view.entity_namespace)),
            (
                MarkerRegion::DbSets,
                format!(
                    "public DbSet<{entity}> {plural} => Set<{entity}>();",
                    entity = view.entity,
                    plural = view.plural
                ),
            ),
        ]
    }

    /// Lines for the infrastructure `DependencyInjection.cs`.
    pub fn service_lines(view: &EntityView) -> Vec<(MarkerRegion, String)> {
        vec![(
            MarkerRegion::Repositories,
            format!(
                "services.AddScoped<I{entity}Repository, {entity}Repository>();",
                entity = view.entity
            ),
        )]
    }

    fn patch(
        ctx: &GenerationContext<'_>,
        path: &Path,
        lines: &[(MarkerRegion, String)],
    ) -> ScaffResult<GeneratedFile> {
        let fs = ctx.filesystem();
        let mut text = fs.read_file(path)?;
        let mut changed = false;

        for (region, line) in lines {
            match insert_into_region(&text, *region, line)? {
                PatchOutcome::Inserted(patched) => {
                    debug!(path = %path.display(), region = %region, line = %line, "Inserted registration");
                    text = patched;
                    changed = true;
                }
                PatchOutcome::AlreadyPresent => {}
            }
        }

        if changed {
            fs.write_file(path, &text)?;
        }

        let outcome = if changed {
            FileOutcome::Patched
        } else {
            FileOutcome::Unchanged
        };
        Ok(GeneratedFile::new(ctx.relative(path), outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::generators::testing::{EchoRenderer, FakeFs};
    use crate::domain::{EntityDefinition, ProjectOptions, SolutionLayout};

    const CONTEXT: &str = "\
// netscaff:usings:begin
// netscaff:usings:end
public class ApplicationDbContext
{
    // netscaff:dbsets:begin
    // netscaff:dbsets:end
}
";

    const SERVICES: &str = "\
        // netscaff:repositories:begin
        // netscaff:repositories:end
";

    fn fixture(options: &ProjectOptions) -> (SolutionLayout, FakeFs) {
        let layout = SolutionLayout::new(options, "/out");
        let fs = FakeFs::default()
            .with_file(layout.db_context_file(), CONTEXT)
            .with_file(layout.infrastructure_di_file(), SERVICES);
        (layout, fs)
    }

    #[test]
    fn registering_twice_leaves_one_line_per_entity() {
        let options = ProjectOptions::new("Shop");
        let (layout, fs) = fixture(&options);
        let ctx = GenerationContext::new(&options, &layout, &fs, &EchoRenderer);
        let view = ctx.entity_view(&EntityDefinition::new("Product"));

        let first = DependencyRegistrar::register(&ctx, &view);
        let second = DependencyRegistrar::register(&ctx, &view);

        assert!(first.files.iter().all(|f| f.outcome == FileOutcome::Patched));
        assert!(second.files.iter().all(|f| f.outcome == FileOutcome::Unchanged));

        let context = fs.get(layout.db_context_file()).unwrap();
        assert_eq!(
            context
                .matches("public DbSet<Product> Products => Set<Product>();")
                .count(),
            1
        );
        let services = fs.get(layout.infrastructure_di_file()).unwrap();
        assert_eq!(
            services
                .matches("services.AddScoped<IProductRepository, ProductRepository>();")
                .count(),
            1
        );
        assert_eq!(context.matches("using Shop.Domain.Entities;").count(), 1);
    }

    #[test]
    fn custom_namespace_adds_a_using() {
        let options = ProjectOptions::new("Shop");
        let (layout, fs) = fixture(&options);
        let ctx = GenerationContext::new(&options, &layout, &fs, &EchoRenderer);
        let view = ctx.entity_view(&EntityDefinition::new("Sku").with_namespace("Shop.Domain.Catalog"));

        assert!(DependencyRegistrar::register(&ctx, &view).success);

        let context = fs.get(layout.db_context_file()).unwrap();
        assert!(context.starts_with("// netscaff:usings:begin\nusing Shop.Domain.Catalog;\n"));
    }

    #[test]
    fn missing_context_file_fails_the_step() {
        let options = ProjectOptions::new("Shop");
        let layout = SolutionLayout::new(&options, "/out");
        let fs = FakeFs::default();
        let ctx = GenerationContext::new(&options, &layout, &fs, &EchoRenderer);
        let view = ctx.entity_view(&EntityDefinition::new("Product"));

        let step = DependencyRegistrar::register(&ctx, &view);

        assert!(!step.success);
        assert!(step.message.contains("ApplicationDbContext.cs"));
    }
}
