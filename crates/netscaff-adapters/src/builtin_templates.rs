//! Template source discovery.
//!
//! Every [`TemplateKey`] has a built-in source compiled into the binary.
//! A directory of overrides can replace individual files: a file present at
//! `<dir>/<key path>` wins, anything missing falls back to the built-in.
//!
//! # Override directory resolution order
//!
//! 1. An explicit directory (the `templates.local_path` config key).
//! 2. **`$NETSCAFF_TEMPLATES_DIR`**, when set.
//! 3. None: built-in sources only.
//!
//! Relative paths are resolved against the current working directory at the
//! time a source is read.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use netscaff_core::{
    application::ApplicationError,
    domain::TemplateKey,
    error::ScaffResult,
};

/// Environment variable naming an override directory.
pub const TEMPLATES_DIR_ENV: &str = "NETSCAFF_TEMPLATES_DIR";

/// The compiled-in source of a template.
pub fn builtin_source(key: TemplateKey) -> &'static str {
    match key {
        TemplateKey::BaseEntity => include_str!("../templates/domain/base_entity.cs.hbs"),
        TemplateKey::Entity => include_str!("../templates/domain/entity.cs.hbs"),
        TemplateKey::CreateCommand => {
            include_str!("../templates/application/commands/create_command.cs.hbs")
        }
        TemplateKey::UpdateCommand => {
            include_str!("../templates/application/commands/update_command.cs.hbs")
        }
        TemplateKey::DeleteCommand => {
            include_str!("../templates/application/commands/delete_command.cs.hbs")
        }
        TemplateKey::GetByIdQuery => {
            include_str!("../templates/application/queries/get_by_id_query.cs.hbs")
        }
        TemplateKey::GetAllQuery => {
            include_str!("../templates/application/queries/get_all_query.cs.hbs")
        }
        TemplateKey::CreateHandler => {
            include_str!("../templates/application/handlers/create_handler.cs.hbs")
        }
        TemplateKey::UpdateHandler => {
            include_str!("../templates/application/handlers/update_handler.cs.hbs")
        }
        TemplateKey::DeleteHandler => {
            include_str!("../templates/application/handlers/delete_handler.cs.hbs")
        }
        TemplateKey::GetByIdHandler => {
            include_str!("../templates/application/handlers/get_by_id_handler.cs.hbs")
        }
        TemplateKey::GetAllHandler => {
            include_str!("../templates/application/handlers/get_all_handler.cs.hbs")
        }
        TemplateKey::GenericRepositoryInterface => {
            include_str!("../templates/application/interfaces/generic_repository.cs.hbs")
        }
        TemplateKey::RepositoryInterface => {
            include_str!("../templates/application/interfaces/repository.cs.hbs")
        }
        TemplateKey::GenericRepository => {
            include_str!("../templates/infrastructure/repositories/generic_repository.cs.hbs")
        }
        TemplateKey::Repository => {
            include_str!("../templates/infrastructure/repositories/repository.cs.hbs")
        }
        TemplateKey::DbContext => {
            include_str!("../templates/infrastructure/persistence/db_context.cs.hbs")
        }
        TemplateKey::InfrastructureDependencyInjection => {
            include_str!("../templates/infrastructure/dependency_injection.cs.hbs")
        }
        TemplateKey::ApplicationDependencyInjection => {
            include_str!("../templates/application/dependency_injection.cs.hbs")
        }
        TemplateKey::Controller => include_str!("../templates/api/controller.cs.hbs"),
        TemplateKey::Program => include_str!("../templates/api/program.cs.hbs"),
    }
}

/// Where template sources come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSources {
    override_dir: Option<PathBuf>,
}

impl TemplateSources {
    /// Built-in sources only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Built-in sources, overridden per file by `dir`.
    pub fn with_override_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    /// Resolve the override directory: `explicit`, else
    /// `$NETSCAFF_TEMPLATES_DIR`, else none.
    pub fn discover(explicit: Option<&Path>) -> Self {
        if let Some(dir) = explicit {
            debug!(path = %dir.display(), "template overrides from configuration");
            return Self::with_override_dir(dir);
        }
        match std::env::var_os(TEMPLATES_DIR_ENV) {
            Some(dir) if !dir.is_empty() => {
                let dir = PathBuf::from(dir);
                debug!(path = %dir.display(), "template overrides from ${}", TEMPLATES_DIR_ENV);
                Self::with_override_dir(dir)
            }
            _ => Self::builtin(),
        }
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Source text for `key`.
    pub fn source(&self, key: TemplateKey) -> ScaffResult<Cow<'static, str>> {
        let Some(dir) = &self.override_dir else {
            return Ok(Cow::Borrowed(builtin_source(key)));
        };

        if !dir.is_dir() {
            warn!(path = %dir.display(), "template override directory does not exist");
            return Ok(Cow::Borrowed(builtin_source(key)));
        }

        let candidate = dir.join(key.path());
        if !candidate.is_file() {
            return Ok(Cow::Borrowed(builtin_source(key)));
        }

        debug!(template = %key, path = %candidate.display(), "using template override");
        std::fs::read_to_string(&candidate)
            .map(Cow::Owned)
            .map_err(|e| {
                ApplicationError::FilesystemError {
                    path: candidate,
                    reason: format!("Failed to read template: {e}"),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_builtin_source() {
        for key in TemplateKey::ALL {
            assert!(!builtin_source(key).trim().is_empty(), "{key} is empty");
        }
    }

    #[test]
    fn marker_regions_exist_in_patched_templates() {
        let context = builtin_source(TemplateKey::DbContext);
        assert!(context.contains("// netscaff:usings:begin"));
        assert!(context.contains("// netscaff:dbsets:end"));

        let services = builtin_source(TemplateKey::InfrastructureDependencyInjection);
        assert!(services.contains("// netscaff:repositories:begin"));
    }

    #[test]
    fn override_file_wins_and_missing_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let entity = dir.path().join(TemplateKey::Entity.path());
        std::fs::create_dir_all(entity.parent().unwrap()).unwrap();
        std::fs::write(&entity, "custom {{entity}}").unwrap();

        let sources = TemplateSources::with_override_dir(dir.path());

        assert_eq!(sources.source(TemplateKey::Entity).unwrap(), "custom {{entity}}");
        assert_eq!(
            sources.source(TemplateKey::Controller).unwrap(),
            builtin_source(TemplateKey::Controller)
        );
    }

    #[test]
    fn explicit_directory_beats_environment() {
        let sources = TemplateSources::discover(Some(Path::new("/opt/templates")));
        assert_eq!(sources.override_dir(), Some(Path::new("/opt/templates")));
    }
}
