//! Render views: the data objects templates are rendered against.
//!
//! Views are derived from a validated request and a [`SolutionLayout`]; they
//! carry every string a template needs so templates stay logic-free (no type
//! mapping, no casing, no pluralisation in template code).

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::Serialize;

use crate::domain::{
    entities::{
        definition::{EntityDefinition, PropertyDefinition, PropertyType},
        layout::{Layer, SolutionLayout},
        project::ProjectOptions,
    },
    naming::{pluralize, to_camel_case},
    value_objects::PrimitiveType,
};

/// Solution-wide values for the shared files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub project: String,
    pub framework: String,
    pub multi_project: bool,
    pub domain_namespace: String,
    pub common_namespace: String,
    pub entities_namespace: String,
    pub application_namespace: String,
    pub interfaces_namespace: String,
    pub infrastructure_namespace: String,
    pub persistence_namespace: String,
    pub repositories_namespace: String,
    pub api_namespace: String,
    pub generated_at: String,
}

impl ProjectView {
    pub fn new(options: &ProjectOptions, layout: &SolutionLayout) -> Self {
        Self {
            project: options.name.clone(),
            framework: options.framework.to_string(),
            multi_project: options.template.is_multi_project(),
            domain_namespace: layout.location(Layer::Domain).namespace,
            common_namespace: layout.common().namespace,
            entities_namespace: layout.entities().namespace,
            application_namespace: layout.location(Layer::Application).namespace,
            interfaces_namespace: layout.interfaces().namespace,
            infrastructure_namespace: layout.location(Layer::Infrastructure).namespace,
            persistence_namespace: layout.persistence().namespace,
            repositories_namespace: layout.repositories().namespace,
            api_namespace: layout.location(Layer::Api).namespace,
            generated_at: Utc::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// Per-entity values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityView {
    #[serde(flatten)]
    pub project: ProjectView,
    pub entity: String,
    pub entity_camel: String,
    pub plural: String,
    pub plural_camel: String,
    /// C# type of `Id`.
    pub key_type: String,
    /// Whether the entity declares its own `Id` (otherwise one is generated
    /// or inherited).
    pub declares_key: bool,
    pub inherits_base: bool,
    /// Namespace the entity class lives in.
    pub entity_namespace: String,
    /// Set when `entity_namespace` differs from the default entities
    /// namespace, so consumers need an extra `using`.
    pub custom_namespace: bool,
    /// Namespaces the entity file imports: `BaseEntity`'s and those of
    /// navigation targets declared elsewhere. Sorted, without duplicates.
    pub usings: Vec<String>,
    pub commands_namespace: String,
    pub queries_namespace: String,
    pub controllers_namespace: String,
    pub properties: Vec<PropertyView>,
    /// Non-key scalar properties: the fields carried by create/update commands.
    pub command_properties: Vec<PropertyView>,
}

impl EntityView {
    /// View for an entity whose navigation targets all live in the default
    /// entities namespace.
    pub fn new(options: &ProjectOptions, layout: &SolutionLayout, entity: &EntityDefinition) -> Self {
        Self::with_namespaces(options, layout, entity, &HashMap::new())
    }

    /// View for an entity; `namespaces` maps entity names to their custom
    /// namespace for navigation targets outside the default one.
    pub fn with_namespaces(
        options: &ProjectOptions,
        layout: &SolutionLayout,
        entity: &EntityDefinition,
        namespaces: &HashMap<String, String>,
    ) -> Self {
        let project = ProjectView::new(options, layout);
        let default_namespace = layout.entities().namespace;
        let entity_namespace = entity
            .namespace
            .clone()
            .unwrap_or_else(|| default_namespace.clone());

        let properties: Vec<PropertyView> = entity.properties.iter().map(PropertyView::new).collect();
        let command_properties = properties
            .iter()
            .filter(|p| !p.is_key && !p.navigation && !p.collection)
            .cloned()
            .collect();

        let key_type = entity
            .key_property()
            .and_then(PropertyDefinition::property_type)
            .map(|t| t.clr_name().to_string())
            .unwrap_or_else(|| PrimitiveType::Guid.clr_name().to_string());

        let mut usings = BTreeSet::new();
        if entity.inherits_base {
            usings.insert(project.common_namespace.clone());
        }
        for property in entity.properties.iter().filter(|p| p.navigation) {
            let target = namespaces
                .get(property.type_name.trim())
                .unwrap_or(&default_namespace);
            usings.insert(target.clone());
        }
        usings.remove(&entity_namespace);

        let plural = pluralize(&entity.name);

        Self {
            project,
            entity_camel: to_camel_case(&entity.name),
            plural_camel: to_camel_case(&plural),
            key_type,
            declares_key: entity.key_property().is_some(),
            inherits_base: entity.inherits_base,
            custom_namespace: entity_namespace != default_namespace,
            usings: usings.into_iter().collect(),
            entity_namespace,
            commands_namespace: layout.commands(&entity.name).namespace,
            queries_namespace: layout.queries(&entity.name).namespace,
            controllers_namespace: layout.controllers().namespace,
            properties,
            command_properties,
            entity: entity.name.clone(),
            plural,
        }
    }
}

/// Per-property values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub name: String,
    pub camel_name: String,
    /// Declared C# type including nullability and collection wrapper.
    pub clr_type: String,
    /// Initialiser expression including `= ` and trailing `;`, or empty.
    pub initializer: String,
    pub required: bool,
    pub navigation: bool,
    pub collection: bool,
    pub is_key: bool,
}

impl PropertyView {
    pub fn new(property: &PropertyDefinition) -> Self {
        // Unknown tags never reach here after validation; fall back to the
        // raw tag so a view can still be built for diagnostics.
        let resolved = property
            .property_type()
            .unwrap_or_else(|| PropertyType::Entity(property.type_name.clone()));
        let element = resolved.clr_name().to_string();
        let is_key = property.is_key();
        let required = property.required || is_key;

        let (clr_type, initializer) = match property.collection {
            Some(kind) => (
                kind.declare(&element),
                format!(" = new {}();", kind.concrete(&element)),
            ),
            None if required && resolved == PropertyType::Primitive(PrimitiveType::String) => {
                (element, " = string.Empty;".to_string())
            }
            None if required && property.navigation => (element, " = null!;".to_string()),
            // Keys are never nullable: handlers return and look up `keyType`.
            None if required => (element, String::new()),
            None => (format!("{element}?"), String::new()),
        };

        Self {
            camel_name: to_camel_case(&property.name),
            name: property.name.clone(),
            clr_type,
            initializer,
            required,
            navigation: property.navigation,
            collection: property.collection.is_some(),
            is_key,
        }
    }
}
