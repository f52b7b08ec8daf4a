use crate::application::report::{GeneratedFile, FileOutcome, StepResult};
use crate::domain::{EntityView, TemplateKey};
use crate::error::ScaffResult;

use super::GenerationContext;

/// Present in every generated `Program.cs`; its absence means the file is
/// still the SDK's.
pub const PROGRAM_MARKER: &str = "// netscaff:program";

/// API layer: controllers, `Program.cs` and removal of the SDK samples.
pub struct ApiGenerator;

impl ApiGenerator {
    /// `Controllers/{Plural}Controller.cs`.
    pub fn controller(ctx: &GenerationContext<'_>, view: &EntityView) -> StepResult {
        StepResult::capture(format!("Controller {}", view.entity), || {
            let key = TemplateKey::Controller;
            let data = ctx.data(key, view)?;
            Ok(vec![ctx.render_to(key, &data, &ctx.layout().controller_file(&view.entity))?])
        })
    }

    /// Replace the SDK's `Program.cs`. A previously generated one is kept
    /// unless `force` is set.
    pub fn program(ctx: &GenerationContext<'_>) -> StepResult {
        StepResult::capture("Program", || Ok(vec![Self::write_program(ctx)?]))
    }

    fn write_program(ctx: &GenerationContext<'_>) -> ScaffResult<GeneratedFile> {
        let key = TemplateKey::Program;
        let path = ctx.layout().program_file();

        if ctx.filesystem().exists(&path) && !ctx.force() {
            let current = ctx.filesystem().read_file(&path)?;
            if current.contains(PROGRAM_MARKER) {
                return Ok(GeneratedFile::new(ctx.relative(&path), FileOutcome::Skipped));
            }
        }

        let data = ctx.data(key, &ctx.project_view())?;
        ctx.write_rendered(key, &data, &path)
    }

    /// Delete `WeatherForecast*` and `Class1.cs` left by the SDK templates.
    pub fn remove_samples(ctx: &GenerationContext<'_>) -> StepResult {
        StepResult::capture("SDK samples", || {
            let mut removed = Vec::new();
            for path in ctx.layout().sdk_sample_files() {
                removed.extend(ctx.remove_if_exists(&path)?);
            }
            Ok(removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::generators::testing::{EchoRenderer, FakeFs};
    use crate::domain::{ProjectOptions, SolutionLayout};

    #[test]
    fn sdk_program_is_replaced_even_without_force() {
        let options = ProjectOptions::new("Shop");
        let layout = SolutionLayout::new(&options, "/out");
        let program = layout.program_file();
        let fs = FakeFs::default().with_file(&program, "var app = builder.Build();");
        let ctx = GenerationContext::new(&options, &layout, &fs, &EchoRenderer);

        let step = ApiGenerator::program(&ctx);

        assert_eq!(step.files[0].outcome, FileOutcome::Overwritten);
        assert!(fs.get(&program).unwrap().starts_with("// api/program.cs.hbs"));
    }

    #[test]
    fn generated_program_is_kept_without_force() {
        let options = ProjectOptions::new("Shop");
        let layout = SolutionLayout::new(&options, "/out");
        let program = layout.program_file();
        let edited = format!("{PROGRAM_MARKER}\n// user edits");
        let fs = FakeFs::default().with_file(&program, &edited);
        let ctx = GenerationContext::new(&options, &layout, &fs, &EchoRenderer);

        let step = ApiGenerator::program(&ctx);

        assert_eq!(step.files[0].outcome, FileOutcome::Skipped);
        assert_eq!(fs.get(&program).unwrap(), edited);
    }

    #[test]
    fn removes_weather_forecast_samples() {
        let options = ProjectOptions::new("Shop");
        let layout = SolutionLayout::new(&options, "/out");
        let api = "/out/Shop/src/Shop.Api";
        let fs = FakeFs::default()
            .with_file(format!("{api}/WeatherForecast.cs"), "")
            .with_file(format!("{api}/Controllers/WeatherForecastController.cs"), "");
        let ctx = GenerationContext::new(&options, &layout, &fs, &EchoRenderer);

        let step = ApiGenerator::remove_samples(&ctx);

        assert_eq!(step.files.len(), 2);
        assert!(step.files.iter().all(|f| f.outcome == FileOutcome::Removed));
        assert!(fs.get(format!("{api}/WeatherForecast.cs")).is_none());
    }
}
