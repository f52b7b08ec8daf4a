use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::project::ProjectOptions,
    naming::pluralize,
    value_objects::ProjectTemplate,
};

/// One architectural layer of the generated solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Domain,
    Application,
    Infrastructure,
    Api,
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Domain,
        Layer::Application,
        Layer::Infrastructure,
        Layer::Api,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "Domain",
            Self::Application => "Application",
            Self::Infrastructure => "Infrastructure",
            Self::Api => "Api",
        }
    }

    /// `dotnet new` template used when the layer is its own project.
    pub const fn sdk_template(&self) -> &'static str {
        match self {
            Self::Api => "webapi",
            _ => "classlib",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `.csproj` created by the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Project name, e.g. `Shop.Domain`.
    pub name: String,
    /// `classlib` or `webapi`.
    pub sdk_template: &'static str,
    /// Project directory (absolute).
    pub dir: PathBuf,
}

impl ProjectFile {
    pub fn csproj(&self) -> PathBuf {
        self.dir.join(format!("{}.csproj", self.name))
    }
}

/// Where a layer's code lives: a directory and the namespace matching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerLocation {
    pub dir: PathBuf,
    pub namespace: String,
}

impl LayerLocation {
    /// Descend into a sub-folder; the namespace follows the folder.
    pub fn child(&self, folder: &str) -> LayerLocation {
        LayerLocation {
            dir: self.dir.join(folder),
            namespace: format!("{}.{}", self.namespace, folder),
        }
    }
}

/// Every path the pipeline touches for one solution.
///
/// The layout is pure arithmetic over the project options: it never looks
/// at the disk.
#[derive(Debug, Clone)]
pub struct SolutionLayout {
    name: String,
    template: ProjectTemplate,
    root: PathBuf,
}

impl SolutionLayout {
    /// Layout for a solution created under `parent` (the solution directory
    /// is `parent/{name}`).
    pub fn new(options: &ProjectOptions, parent: impl AsRef<Path>) -> Self {
        Self {
            name: options.name.clone(),
            template: options.template,
            root: parent.as_ref().join(&options.name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> ProjectTemplate {
        self.template
    }

    /// Solution directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn solution_file(&self) -> PathBuf {
        self.root.join(format!("{}.sln", self.name))
    }

    /// Projects to create, in creation order.
    pub fn projects(&self) -> Vec<ProjectFile> {
        if self.template.is_multi_project() {
            Layer::ALL
                .iter()
                .map(|layer| self.project_for(*layer))
                .collect()
        } else {
            vec![self.project_for(Layer::Api)]
        }
    }

    /// The project a layer's code lives in.
    pub fn project_for(&self, layer: Layer) -> ProjectFile {
        if self.template.is_multi_project() {
            let name = format!("{}.{}", self.name, layer);
            ProjectFile {
                dir: self.root.join("src").join(&name),
                sdk_template: layer.sdk_template(),
                name,
            }
        } else {
            ProjectFile {
                name: self.name.clone(),
                sdk_template: "webapi",
                dir: self.root.join("src").join(&self.name),
            }
        }
    }

    /// `(from, to)` project references, by project.
    pub fn references(&self) -> Vec<(ProjectFile, ProjectFile)> {
        if !self.template.is_multi_project() {
            return Vec::new();
        }
        [
            (Layer::Application, Layer::Domain),
            (Layer::Infrastructure, Layer::Application),
            (Layer::Api, Layer::Application),
            (Layer::Api, Layer::Infrastructure),
        ]
        .iter()
        .map(|(from, to)| (self.project_for(*from), self.project_for(*to)))
        .collect()
    }

    /// Directory + namespace of a layer.
    ///
    /// Domain, Application and Infrastructure resolve to the same namespaces
    /// in both templates; the Api layer is the project root.
    pub fn location(&self, layer: Layer) -> LayerLocation {
        let project = self.project_for(layer);
        if self.template.is_multi_project() || layer == Layer::Api {
            LayerLocation {
                dir: project.dir,
                namespace: project.name,
            }
        } else {
            LayerLocation {
                dir: project.dir.join(layer.as_str()),
                namespace: format!("{}.{}", self.name, layer),
            }
        }
    }

    /// Default namespace for entities.
    pub fn entities(&self) -> LayerLocation {
        self.location(Layer::Domain).child("Entities")
    }

    pub fn common(&self) -> LayerLocation {
        self.location(Layer::Domain).child("Common")
    }

    pub fn interfaces(&self) -> LayerLocation {
        self.location(Layer::Application).child("Interfaces")
    }

    /// `Application/Features/{Plural}`.
    pub fn feature(&self, entity: &str) -> LayerLocation {
        self.location(Layer::Application)
            .child("Features")
            .child(&pluralize(entity))
    }

    pub fn commands(&self, entity: &str) -> LayerLocation {
        self.feature(entity).child("Commands")
    }

    pub fn queries(&self, entity: &str) -> LayerLocation {
        self.feature(entity).child("Queries")
    }

    pub fn repositories(&self) -> LayerLocation {
        self.location(Layer::Infrastructure).child("Repositories")
    }

    pub fn persistence(&self) -> LayerLocation {
        self.location(Layer::Infrastructure).child("Persistence")
    }

    pub fn controllers(&self) -> LayerLocation {
        self.location(Layer::Api).child("Controllers")
    }

    // ── Files ────────────────────────────────────────────────────────────────

    pub fn base_entity_file(&self) -> PathBuf {
        self.common().dir.join("BaseEntity.cs")
    }

    pub fn entity_file(&self, entity: &str) -> PathBuf {
        self.entities().dir.join(format!("{entity}.cs"))
    }

    pub fn generic_repository_interface_file(&self) -> PathBuf {
        self.interfaces().dir.join("IRepository.cs")
    }

    pub fn repository_interface_file(&self, entity: &str) -> PathBuf {
        self.interfaces().dir.join(format!("I{entity}Repository.cs"))
    }

    pub fn generic_repository_file(&self) -> PathBuf {
        self.repositories().dir.join("Repository.cs")
    }

    pub fn repository_file(&self, entity: &str) -> PathBuf {
        self.repositories().dir.join(format!("{entity}Repository.cs"))
    }

    pub fn db_context_file(&self) -> PathBuf {
        self.persistence().dir.join("ApplicationDbContext.cs")
    }

    pub fn application_di_file(&self) -> PathBuf {
        self.location(Layer::Application)
            .dir
            .join("DependencyInjection.cs")
    }

    pub fn infrastructure_di_file(&self) -> PathBuf {
        self.location(Layer::Infrastructure)
            .dir
            .join("DependencyInjection.cs")
    }

    pub fn controller_file(&self, entity: &str) -> PathBuf {
        self.controllers()
            .dir
            .join(format!("{}Controller.cs", pluralize(entity)))
    }

    pub fn program_file(&self) -> PathBuf {
        self.project_for(Layer::Api).dir.join("Program.cs")
    }

    /// Sample files the SDK templates create that the scaffold replaces.
    pub fn sdk_sample_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .projects()
            .into_iter()
            .filter(|p| p.sdk_template == "classlib")
            .map(|p| p.dir.join("Class1.cs"))
            .collect();

        let api = self.project_for(Layer::Api).dir;
        files.push(api.join("WeatherForecast.cs"));
        files.push(api.join("Controllers").join("WeatherForecastController.cs"));
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean() -> SolutionLayout {
        SolutionLayout::new(&ProjectOptions::new("Shop"), "/work")
    }

    fn single() -> SolutionLayout {
        SolutionLayout::new(
            &ProjectOptions::new("Shop").with_template(ProjectTemplate::WebApi),
            "/work",
        )
    }

    #[test]
    fn clean_layout_has_four_projects() {
        let layout = clean();
        let names: Vec<_> = layout.projects().into_iter().map(|p| p.name).collect();

        assert_eq!(
            names,
            ["Shop.Domain", "Shop.Application", "Shop.Infrastructure", "Shop.Api"]
        );
        assert_eq!(layout.solution_file(), PathBuf::from("/work/Shop/Shop.sln"));
        assert_eq!(
            layout.project_for(Layer::Domain).csproj(),
            PathBuf::from("/work/Shop/src/Shop.Domain/Shop.Domain.csproj")
        );
        assert_eq!(layout.references().len(), 4);
    }

    #[test]
    fn webapi_layout_has_one_project_and_no_references() {
        let layout = single();
        let projects = layout.projects();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].sdk_template, "webapi");
        assert!(layout.references().is_empty());
    }

    #[test]
    fn namespaces_match_across_templates() {
        for layout in [clean(), single()] {
            assert_eq!(layout.entities().namespace, "Shop.Domain.Entities");
            assert_eq!(
                layout.commands("Category").namespace,
                "Shop.Application.Features.Categories.Commands"
            );
            assert_eq!(
                layout.persistence().namespace,
                "Shop.Infrastructure.Persistence"
            );
        }
    }

    #[test]
    fn files_land_in_layer_folders() {
        assert_eq!(
            clean().entity_file("Product"),
            PathBuf::from("/work/Shop/src/Shop.Domain/Entities/Product.cs")
        );
        assert_eq!(
            single().entity_file("Product"),
            PathBuf::from("/work/Shop/src/Shop/Domain/Entities/Product.cs")
        );
        assert_eq!(
            clean().controller_file("Category"),
            PathBuf::from("/work/Shop/src/Shop.Api/Controllers/CategoriesController.cs")
        );
        assert_eq!(
            single().db_context_file(),
            PathBuf::from("/work/Shop/src/Shop/Infrastructure/Persistence/ApplicationDbContext.cs")
        );
    }

    #[test]
    fn sample_files_cover_class_libraries_and_weather_forecast() {
        let samples = clean().sdk_sample_files();
        assert!(samples.contains(&PathBuf::from("/work/Shop/src/Shop.Domain/Class1.cs")));
        assert!(samples.contains(&PathBuf::from("/work/Shop/src/Shop.Api/WeatherForecast.cs")));
        assert!(!samples.contains(&PathBuf::from("/work/Shop/src/Shop.Api/Class1.cs")));
    }
}
