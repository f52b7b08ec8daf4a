use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProjectTemplate, TargetFramework};

/// Solution-level options of a scaffold request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOptions {
    /// Solution name; also the root namespace.
    pub name: String,

    #[serde(default)]
    pub template: ProjectTemplate,

    #[serde(default, alias = "targetFramework")]
    pub framework: TargetFramework,

    /// Parent directory for local generation. The download route ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Overwrite generated files and pass `--force` to the SDK.
    #[serde(default)]
    pub force: bool,
}

impl ProjectOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: ProjectTemplate::default(),
            framework: TargetFramework::default(),
            output_path: None,
            force: false,
        }
    }

    pub fn with_template(mut self, template: ProjectTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_framework(mut self, framework: TargetFramework) -> Self {
        self.framework = framework;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let options: ProjectOptions = serde_json::from_str(r#"{"name":"Shop"}"#).unwrap();
        assert_eq!(options, ProjectOptions::new("Shop"));
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let options: ProjectOptions = serde_json::from_str(
            r#"{"name":"Shop","template":"webapi","targetFramework":"net7.0","outputPath":"/tmp/out","force":true}"#,
        )
        .unwrap();

        assert_eq!(options.template, ProjectTemplate::WebApi);
        assert_eq!(options.framework, TargetFramework::Net7);
        assert_eq!(options.output_path, Some(PathBuf::from("/tmp/out")));
        assert!(options.force);
    }

    #[test]
    fn rejects_unknown_template() {
        let result: Result<ProjectOptions, _> =
            serde_json::from_str(r#"{"name":"Shop","template":"blazor"}"#);
        assert!(result.is_err());
    }
}
