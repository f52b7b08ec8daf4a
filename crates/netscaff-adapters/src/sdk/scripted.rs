//! An SDK stand-in that writes the files `dotnet` would, without a process.
//!
//! Used by tests and by the `--offline` flag of `netscaff serve` and
//! `netscaff new` on machines without the SDK. Only the commands the
//! bootstrapper issues are understood: `--version`, `--list-sdks`,
//! `new sln`, `new classlib`, `new webapi`, `sln <sln> add <csproj>` and
//! `add <csproj> reference <csproj>`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use netscaff_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, SdkCli, SdkInvocation, SdkOutput},
    },
    error::ScaffResult,
};

const DEFAULT_VERSION: &str = "8.0.100";
const DEFAULT_FRAMEWORK: &str = "net8.0";
const CSHARP_PROJECT_TYPE: &str = "{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}";
/// `dotnet new` exit code when it would overwrite files.
const EXIT_CANNOT_CREATE_OUTPUT: i32 = 73;

/// Scripted SDK writing through a [`Filesystem`].
///
/// Clones share the invocation log.
#[derive(Clone)]
pub struct ScriptedSdk<F> {
    filesystem: F,
    version: String,
    failures: Vec<(Vec<String>, SdkOutput)>,
    available: bool,
    log: Arc<Mutex<Vec<SdkInvocation>>>,
}

impl<F: Filesystem> ScriptedSdk<F> {
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem,
            version: DEFAULT_VERSION.to_string(),
            failures: Vec::new(),
            available: true,
            log: Arc::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Answer any command starting with `prefix` with a failed exit.
    pub fn failing_on(mut self, prefix: &[&str], code: i32, stderr: impl Into<String>) -> Self {
        self.failures.push((
            prefix.iter().map(|s| s.to_string()).collect(),
            SdkOutput::failure(code, stderr),
        ));
        self
    }

    /// Behave as if the executable were not installed.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Every invocation received so far, in order.
    pub fn invocations(&self) -> Vec<SdkInvocation> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn dispatch(&self, inv: &SdkInvocation) -> ScaffResult<SdkOutput> {
        let args: Vec<&str> = inv.args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["--version"] => Ok(SdkOutput::success(format!("{}\n", self.version))),
            ["--list-sdks"] => Ok(SdkOutput::success(format!(
                "{} [/usr/share/dotnet/sdk]\n",
                self.version
            ))),
            ["new", "sln", ..] => self.new_solution(inv),
            ["new", template @ ("classlib" | "webapi"), ..] => self.new_project(template, inv),
            ["new", template, ..] => Ok(SdkOutput::failure(
                103,
                format!("No templates found matching: '{template}'."),
            )),
            ["sln", solution, "add", project] => {
                self.add_to_solution(Path::new(solution), Path::new(project))
            }
            ["add", from, "reference", to] => self.add_reference(Path::new(from), Path::new(to)),
            _ => Ok(SdkOutput::failure(
                1,
                format!("Unrecognized command or argument '{}'", inv.args.join(" ")),
            )),
        }
    }

    fn new_solution(&self, inv: &SdkInvocation) -> ScaffResult<SdkOutput> {
        let (Some(name), Some(output)) = (inv.value_of("--name"), inv.value_of("--output")) else {
            return Ok(SdkOutput::failure(1, "Missing --name or --output"));
        };
        let path = Path::new(output).join(format!("{name}.sln"));
        if let Some(refused) = self.refuse_overwrite(inv, &[path.clone()]) {
            return Ok(refused);
        }

        self.write(&path, &solution_file())?;
        Ok(SdkOutput::success(
            "The template \"Solution File\" was created successfully.\n",
        ))
    }

    fn new_project(&self, template: &str, inv: &SdkInvocation) -> ScaffResult<SdkOutput> {
        let (Some(name), Some(output)) = (inv.value_of("--name"), inv.value_of("--output")) else {
            return Ok(SdkOutput::failure(1, "Missing --name or --output"));
        };
        let framework = inv.value_of("--framework").unwrap_or(DEFAULT_FRAMEWORK);
        let dir = Path::new(output);

        let files: Vec<(PathBuf, String)> = if template == "webapi" {
            vec![
                (dir.join(format!("{name}.csproj")), csproj("Microsoft.NET.Sdk.Web", framework)),
                (dir.join("Program.cs"), SAMPLE_PROGRAM.to_string()),
                (dir.join("WeatherForecast.cs"), weather_forecast(name)),
                (
                    dir.join("Controllers").join("WeatherForecastController.cs"),
                    weather_forecast_controller(name),
                ),
                (dir.join("appsettings.json"), APP_SETTINGS.to_string()),
            ]
        } else {
            vec![
                (dir.join(format!("{name}.csproj")), csproj("Microsoft.NET.Sdk", framework)),
                (dir.join("Class1.cs"), class1(name)),
            ]
        };

        let paths: Vec<PathBuf> = files.iter().map(|(p, _)| p.clone()).collect();
        if let Some(refused) = self.refuse_overwrite(inv, &paths) {
            return Ok(refused);
        }

        for (path, content) in &files {
            self.write(path, content)?;
        }
        Ok(SdkOutput::success(format!(
            "The template \"{template}\" was created successfully.\n"
        )))
    }

    fn add_to_solution(&self, solution: &Path, project: &Path) -> ScaffResult<SdkOutput> {
        if !self.filesystem.exists(solution) {
            return Ok(SdkOutput::failure(
                1,
                format!("Could not find solution or directory `{}`.", solution.display()),
            ));
        }
        if !self.filesystem.exists(project) {
            return Ok(SdkOutput::failure(
                1,
                format!("Could not find project or directory `{}`.", project.display()),
            ));
        }

        let text = self.filesystem.read_file(solution)?;
        let base = solution.parent().unwrap_or_else(|| Path::new(""));
        let relative = windows_path(project.strip_prefix(base).unwrap_or(project));
        if text.contains(&format!("\"{relative}\"")) {
            return Ok(SdkOutput::success(format!(
                "Solution {} already contains project {relative}.\n",
                solution.display()
            )));
        }

        let name = project
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ordinal = text.matches("\nEndProject").count() + 1;
        let entry = format!(
            "Project(\"{CSHARP_PROJECT_TYPE}\") = \"{name}\", \"{relative}\", \"{{{ordinal:08X}-0000-0000-0000-000000000000}}\"\nEndProject\n"
        );
        let patched = match text.find("Global\n") {
            Some(at) => format!("{}{entry}{}", &text[..at], &text[at..]),
            None => format!("{text}{entry}"),
        };

        self.filesystem.write_file(solution, &patched)?;
        Ok(SdkOutput::success(format!(
            "Project `{relative}` added to the solution.\n"
        )))
    }

    fn add_reference(&self, from: &Path, to: &Path) -> ScaffResult<SdkOutput> {
        for project in [from, to] {
            if !self.filesystem.exists(project) {
                return Ok(SdkOutput::failure(
                    1,
                    format!("Could not find project or directory `{}`.", project.display()),
                ));
            }
        }

        let reference = relative_reference(from, to);
        let text = self.filesystem.read_file(from)?;
        if text.contains(&format!("Include=\"{reference}\"")) {
            return Ok(SdkOutput::success(format!(
                "Project already has a reference to `{reference}`.\n"
            )));
        }

        let group = format!(
            "  <ItemGroup>\n    <ProjectReference Include=\"{reference}\" />\n  </ItemGroup>\n\n"
        );
        let patched = match text.rfind("</Project>") {
            Some(at) => format!("{}{group}{}", &text[..at], &text[at..]),
            None => return Ok(SdkOutput::failure(1, "Project file is not valid MSBuild")),
        };

        self.filesystem.write_file(from, &patched)?;
        Ok(SdkOutput::success(format!(
            "Reference `{reference}` added to the project.\n"
        )))
    }

    fn refuse_overwrite(&self, inv: &SdkInvocation, paths: &[PathBuf]) -> Option<SdkOutput> {
        if inv.args.iter().any(|a| a == "--force") {
            return None;
        }
        let existing: Vec<String> = paths
            .iter()
            .filter(|p| self.filesystem.exists(p))
            .map(|p| format!("  {}", p.display()))
            .collect();
        if existing.is_empty() {
            return None;
        }
        Some(SdkOutput::failure(
            EXIT_CANNOT_CREATE_OUTPUT,
            format!(
                "Creating this template will make changes to existing files:\n{}\nRerun the command and pass --force to accept and create.",
                existing.join("\n")
            ),
        ))
    }

    fn write(&self, path: &Path, content: &str) -> ScaffResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)
    }
}

impl<F: Filesystem> SdkCli for ScriptedSdk<F> {
    fn executable(&self) -> String {
        "dotnet".to_string()
    }

    fn run(&self, invocation: &SdkInvocation) -> ScaffResult<SdkOutput> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());
        debug!(command = %invocation, "scripted SDK");

        if !self.available {
            return Err(ApplicationError::SdkUnavailable {
                executable: self.executable(),
            }
            .into());
        }

        if let Some((_, output)) = self.failures.iter().find(|(prefix, _)| {
            let prefix: Vec<&str> = prefix.iter().map(String::as_str).collect();
            invocation.starts_with(&prefix)
        }) {
            return Ok(output.clone());
        }

        self.dispatch(invocation)
    }
}

fn windows_path(path: &Path) -> String {
    path.display().to_string().replace('/', "\\")
}

/// `..\Other\Other.csproj` for sibling project directories, the full path
/// otherwise.
fn relative_reference(from: &Path, to: &Path) -> String {
    let from_parent = from.parent().and_then(Path::parent);
    let to_dir = to.parent();
    match (from_parent, to_dir) {
        (Some(base), Some(dir)) if dir.parent() == Some(base) => {
            let folder = dir.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
            let file = to.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
            format!("..\\{folder}\\{file}")
        }
        _ => to.display().to_string(),
    }
}

fn solution_file() -> String {
    "\
Microsoft Visual Studio Solution File, Format Version 12.00
# Visual Studio Version 17
VisualStudioVersion = 17.0.31903.59
MinimumVisualStudioVersion = 10.0.40219.1
Global
\tGlobalSection(SolutionConfigurationPlatforms) = preSolution
\t\tDebug|Any CPU = Debug|Any CPU
\t\tRelease|Any CPU = Release|Any CPU
\tEndGlobalSection
EndGlobal
"
    .to_string()
}

fn csproj(sdk: &str, framework: &str) -> String {
    format!(
        "<Project Sdk=\"{sdk}\">

  <PropertyGroup>
    <TargetFramework>{framework}</TargetFramework>
    <ImplicitUsings>enable</ImplicitUsings>
    <Nullable>enable</Nullable>
  </PropertyGroup>

</Project>
"
    )
}

fn class1(namespace: &str) -> String {
    format!("namespace {namespace};\n\npublic class Class1\n{{\n\n}}\n")
}

fn weather_forecast(namespace: &str) -> String {
    format!(
        "namespace {namespace};

public class WeatherForecast
{{
    public DateOnly Date {{ get; set; }}

    public int TemperatureC {{ get; set; }}

    public int TemperatureF => 32 + (int)(TemperatureC / 0.5556);

    public string? Summary {{ get; set; }}
}}
"
    )
}

fn weather_forecast_controller(namespace: &str) -> String {
    format!(
        "using Microsoft.AspNetCore.Mvc;

namespace {namespace}.Controllers;

[ApiController]
[Route(\"[controller]\")]
public class WeatherForecastController : ControllerBase
{{
    [HttpGet(Name = \"GetWeatherForecast\")]
    public IEnumerable<WeatherForecast> Get()
    {{
        return Enumerable.Range(1, 5).Select(index => new WeatherForecast
        {{
            Date = DateOnly.FromDateTime(DateTime.Now.AddDays(index)),
            TemperatureC = Random.Shared.Next(-20, 55),
        }})
        .ToArray();
    }}
}}
"
    )
}

const SAMPLE_PROGRAM: &str = "\
var builder = WebApplication.CreateBuilder(args);

builder.Services.AddControllers();
builder.Services.AddEndpointsApiExplorer();
builder.Services.AddSwaggerGen();

var app = builder.Build();

if (app.Environment.IsDevelopment())
{
    app.UseSwagger();
    app.UseSwaggerUI();
}

app.UseHttpsRedirection();
app.UseAuthorization();
app.MapControllers();

app.Run();
";

const APP_SETTINGS: &str = r#"{
  "Logging": {
    "LogLevel": {
      "Default": "Information",
      "Microsoft.AspNetCore": "Warning"
    }
  },
  "AllowedHosts": "*"
}
"#;
