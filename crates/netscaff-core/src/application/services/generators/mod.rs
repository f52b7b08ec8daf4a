//! Per-layer file generators.
//!
//! Every generator is a unit struct whose operations take a
//! [`GenerationContext`] and return a [`StepResult`]. Errors are captured
//! into the result; a failing generator never stops the pipeline.

mod api;
mod application_layer;
mod command;
mod entity;
mod handler;
mod infrastructure;
mod registrar;
mod repository;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

pub use api::ApiGenerator;
pub use application_layer::ApplicationGenerator;
pub use command::CommandGenerator;
pub use entity::EntityGenerator;
pub use handler::HandlerGenerator;
pub use infrastructure::InfrastructureGenerator;
pub use registrar::DependencyRegistrar;
pub use repository::RepositoryGenerator;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        report::{FileOutcome, GeneratedFile},
    },
    domain::{EntityDefinition, EntityView, ProjectOptions, ProjectView, SolutionLayout, TemplateKey},
    error::ScaffResult,
};

/// Generators reachable from the single-generator routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Entity,
    Command,
    Handler,
    Repository,
}

impl GeneratorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Command => "command",
            Self::Handler => "handler",
            Self::Repository => "repository",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a generator needs: where files go, how to render them and
/// where to write them.
pub struct GenerationContext<'a> {
    options: &'a ProjectOptions,
    layout: &'a SolutionLayout,
    filesystem: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
    /// Custom namespaces of the entities being generated, by entity name.
    namespaces: HashMap<String, String>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        options: &'a ProjectOptions,
        layout: &'a SolutionLayout,
        filesystem: &'a dyn Filesystem,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            options,
            layout,
            filesystem,
            renderer,
            namespaces: HashMap::new(),
        }
    }

    /// Record the custom namespaces of `entities` so navigations into them
    /// get a `using`.
    pub fn with_entities(mut self, entities: &[EntityDefinition]) -> Self {
        self.namespaces.extend(
            entities
                .iter()
                .filter_map(|e| Some((e.name.clone(), e.namespace.clone()?))),
        );
        self
    }

    pub fn layout(&self) -> &SolutionLayout {
        self.layout
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem
    }

    pub fn force(&self) -> bool {
        self.options.force
    }

    pub fn project_view(&self) -> ProjectView {
        ProjectView::new(self.options, self.layout)
    }

    pub fn entity_view(&self, entity: &EntityDefinition) -> EntityView {
        EntityView::with_namespaces(self.options, self.layout, entity, &self.namespaces)
    }

    /// Serialize a view into template data.
    pub fn data<T: Serialize>(&self, key: TemplateKey, view: &T) -> ScaffResult<serde_json::Value> {
        serde_json::to_value(view).map_err(|e| {
            ApplicationError::RenderingFailed {
                template: key.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Render `key` into `path` unless the file exists and `force` is off.
    pub fn render_to(
        &self,
        key: TemplateKey,
        data: &serde_json::Value,
        path: &Path,
    ) -> ScaffResult<GeneratedFile> {
        if self.filesystem.exists(path) && !self.options.force {
            debug!(path = %path.display(), "Exists, skipping");
            return Ok(GeneratedFile::new(self.relative(path), FileOutcome::Skipped));
        }
        self.write_rendered(key, data, path)
    }

    /// Render `key` into `path`, replacing whatever is there.
    pub fn write_rendered(
        &self,
        key: TemplateKey,
        data: &serde_json::Value,
        path: &Path,
    ) -> ScaffResult<GeneratedFile> {
        let existed = self.filesystem.exists(path);
        let content = self.renderer.render(key, data)?;

        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, &content)?;
        debug!(template = %key, path = %path.display(), "Wrote file");

        let outcome = if existed {
            FileOutcome::Overwritten
        } else {
            FileOutcome::Created
        };
        Ok(GeneratedFile::new(self.relative(path), outcome))
    }

    /// Delete `path` if present.
    pub fn remove_if_exists(&self, path: &Path) -> ScaffResult<Option<GeneratedFile>> {
        if !self.filesystem.exists(path) {
            return Ok(None);
        }
        self.filesystem.remove_file(path)?;
        debug!(path = %path.display(), "Removed file");
        Ok(Some(GeneratedFile::new(self.relative(path), FileOutcome::Removed)))
    }

    /// `path` relative to the solution directory.
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.layout.root())
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-process doubles shared by the generator tests.

    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use crate::application::{ApplicationError, ports::Filesystem, ports::TemplateRenderer};
    use crate::domain::TemplateKey;
    use crate::error::ScaffResult;

    #[derive(Default)]
    pub struct FakeFs {
        pub files: Mutex<BTreeMap<PathBuf, String>>,
    }

    impl FakeFs {
        pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(path.into(), content.to_string());
            self
        }

        pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.lock().unwrap().get(path.as_ref()).cloned()
        }
    }

    impl Filesystem for FakeFs {
        fn create_dir_all(&self, _path: &Path) -> ScaffResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> ScaffResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn read_file(&self, path: &Path) -> ScaffResult<String> {
            self.get(path).ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
        }

        fn exists(&self, path: &Path) -> bool {
            let files = self.files.lock().unwrap();
            files.keys().any(|p| p.starts_with(path))
        }

        fn remove_file(&self, path: &Path) -> ScaffResult<()> {
            self.files.lock().unwrap().remove(path);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> ScaffResult<()> {
            self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
            Ok(())
        }
    }

    /// Renders `// {template}` followed by the view's `entity` (or `project`).
    pub struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(&self, key: TemplateKey, data: &serde_json::Value) -> ScaffResult<String> {
            let subject = data
                .get("entity")
                .or_else(|| data.get("project"))
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            Ok(format!("// {key}\n{subject}\n"))
        }
    }
}
