// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for netscaff.
//!
//! This module contains pure business logic: request types, validation,
//! solution layout arithmetic, render views and marker-region patching.
//! All I/O, templating and SDK concerns are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process or network calls
//! - **Immutable values**: All domain objects are Clone + PartialEq
//! - **Derived views**: Templates receive precomputed strings, never raw requests
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod naming;
pub mod patch;
pub mod template_key;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    EntityDefinition, EntityRequest, EntityView, Layer, LayerLocation, ProjectFile,
    ProjectOptions, ProjectView, PropertyDefinition, PropertyType, PropertyView,
    ScaffoldRequest, SolutionLayout,
};

pub use error::{DomainError, ErrorCategory};

pub use patch::{MarkerRegion, PatchOutcome, insert_into_region};
pub use template_key::TemplateKey;
pub use value_objects::{CollectionKind, PrimitiveType, ProjectTemplate, TargetFramework};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn template_and_framework_parse_from_wire_spellings() {
        assert_eq!(ProjectTemplate::from_str("clean").unwrap(), ProjectTemplate::Clean);
        assert_eq!(ProjectTemplate::from_str("WebApi").unwrap(), ProjectTemplate::WebApi);
        assert!(ProjectTemplate::from_str("mvc").is_err());

        assert_eq!(TargetFramework::from_str("net8.0").unwrap(), TargetFramework::Net8);
        assert!(TargetFramework::from_str("net5.0").is_err());
    }

    // ========================================================================
    // Request → Layout → View Tests
    // ========================================================================

    #[test]
    fn validated_request_produces_consistent_views() {
        let request = ScaffoldRequest::new(ProjectOptions::new("Library")).with_entity(
            EntityDefinition::new("Book")
                .inheriting_base()
                .with_property(PropertyDefinition::new("Title", "string").required()),
        );
        DomainValidator::validate_request(&request).unwrap();

        let layout = SolutionLayout::new(&request.project, "/tmp/out");
        let view = EntityView::new(&request.project, &layout, &request.entities[0]);

        assert_eq!(view.plural, "Books");
        assert_eq!(view.entity_namespace, layout.entities().namespace);
        assert!(layout.entity_file("Book").starts_with(layout.root()));
    }

    #[test]
    fn validation_errors_are_categorised() {
        let errors = DomainValidator::violations(&ScaffoldRequest::new(ProjectOptions::new("Ok")));
        assert!(errors.iter().all(|e| e.category() == ErrorCategory::Validation));
        assert!(!errors[0].suggestions().is_empty());
    }

    #[test]
    fn marker_patch_is_idempotent_through_reexports() {
        let text = "// netscaff:usings:begin\n// netscaff:usings:end\n";
        let PatchOutcome::Inserted(once) =
            insert_into_region(text, MarkerRegion::Usings, "using A;").unwrap()
        else {
            panic!("expected insertion");
        };
        assert_eq!(
            insert_into_region(&once, MarkerRegion::Usings, "using A;").unwrap(),
            PatchOutcome::AlreadyPresent
        );
    }
}
