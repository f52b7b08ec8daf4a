pub mod definition;
pub mod layout;
pub mod project;
pub mod view;

pub use crate::domain::DomainError;
pub use definition::{
    EntityDefinition, EntityRequest, PropertyDefinition, PropertyType, ScaffoldRequest,
};
pub use layout::{Layer, LayerLocation, ProjectFile, SolutionLayout};
pub use project::ProjectOptions;
pub use view::{EntityView, ProjectView, PropertyView};
