use std::fmt;

/// Identifier of a built-in template.
///
/// The set is closed: every file the generators write comes from exactly one
/// of these. [`TemplateKey::path`] is the cache key and the relative path
/// under a template override directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    BaseEntity,
    Entity,
    CreateCommand,
    UpdateCommand,
    DeleteCommand,
    GetByIdQuery,
    GetAllQuery,
    CreateHandler,
    UpdateHandler,
    DeleteHandler,
    GetByIdHandler,
    GetAllHandler,
    GenericRepositoryInterface,
    RepositoryInterface,
    GenericRepository,
    Repository,
    DbContext,
    InfrastructureDependencyInjection,
    ApplicationDependencyInjection,
    Controller,
    Program,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 21] = [
        TemplateKey::BaseEntity,
        TemplateKey::Entity,
        TemplateKey::CreateCommand,
        TemplateKey::UpdateCommand,
        TemplateKey::DeleteCommand,
        TemplateKey::GetByIdQuery,
        TemplateKey::GetAllQuery,
        TemplateKey::CreateHandler,
        TemplateKey::UpdateHandler,
        TemplateKey::DeleteHandler,
        TemplateKey::GetByIdHandler,
        TemplateKey::GetAllHandler,
        TemplateKey::GenericRepositoryInterface,
        TemplateKey::RepositoryInterface,
        TemplateKey::GenericRepository,
        TemplateKey::Repository,
        TemplateKey::DbContext,
        TemplateKey::InfrastructureDependencyInjection,
        TemplateKey::ApplicationDependencyInjection,
        TemplateKey::Controller,
        TemplateKey::Program,
    ];

    pub const fn path(&self) -> &'static str {
        match self {
            Self::BaseEntity => "domain/base_entity.cs.hbs",
            Self::Entity => "domain/entity.cs.hbs",
            Self::CreateCommand => "application/commands/create_command.cs.hbs",
            Self::UpdateCommand => "application/commands/update_command.cs.hbs",
            Self::DeleteCommand => "application/commands/delete_command.cs.hbs",
            Self::GetByIdQuery => "application/queries/get_by_id_query.cs.hbs",
            Self::GetAllQuery => "application/queries/get_all_query.cs.hbs",
            Self::CreateHandler => "application/handlers/create_handler.cs.hbs",
            Self::UpdateHandler => "application/handlers/update_handler.cs.hbs",
            Self::DeleteHandler => "application/handlers/delete_handler.cs.hbs",
            Self::GetByIdHandler => "application/handlers/get_by_id_handler.cs.hbs",
            Self::GetAllHandler => "application/handlers/get_all_handler.cs.hbs",
            Self::GenericRepositoryInterface => "application/interfaces/generic_repository.cs.hbs",
            Self::RepositoryInterface => "application/interfaces/repository.cs.hbs",
            Self::GenericRepository => "infrastructure/repositories/generic_repository.cs.hbs",
            Self::Repository => "infrastructure/repositories/repository.cs.hbs",
            Self::DbContext => "infrastructure/persistence/db_context.cs.hbs",
            Self::InfrastructureDependencyInjection => "infrastructure/dependency_injection.cs.hbs",
            Self::ApplicationDependencyInjection => "application/dependency_injection.cs.hbs",
            Self::Controller => "api/controller.cs.hbs",
            Self::Program => "api/program.cs.hbs",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique_and_relative() {
        let paths: HashSet<_> = TemplateKey::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(paths.len(), TemplateKey::ALL.len());
        assert!(paths.iter().all(|p| !p.starts_with('/') && p.ends_with(".hbs")));
    }
}
