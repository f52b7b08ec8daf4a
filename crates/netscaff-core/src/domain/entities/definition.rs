use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::project::ProjectOptions,
    value_objects::{CollectionKind, PrimitiveType},
};

/// Full scaffold payload: project options plus the entities to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldRequest {
    pub project: ProjectOptions,
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

impl ScaffoldRequest {
    pub fn new(project: ProjectOptions) -> Self {
        Self {
            project,
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: EntityDefinition) -> Self {
        self.entities.push(entity);
        self
    }

    /// Names of every entity in the request.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }
}

/// Payload of the single-generator development routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRequest {
    pub project: ProjectOptions,
    pub entity: EntityDefinition,
    /// Entities that already exist in the solution and may be referenced by
    /// navigation properties.
    #[serde(default)]
    pub known_entities: Vec<String>,
}

/// One domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    pub name: String,

    /// Overrides the default `{Project}.Domain.Entities` namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Derive from the generated `BaseEntity` (Id, CreatedAt, UpdatedAt).
    #[serde(default)]
    pub inherits_base: bool,

    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl EntityDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            inherits_base: false,
            properties: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn inheriting_base(mut self) -> Self {
        self.inherits_base = true;
        self
    }

    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// The user-declared `Id` property, if any.
    pub fn key_property(&self) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.is_key())
    }
}

/// Name of the primary key property, declared or generated.
pub const KEY_PROPERTY: &str = "Id";

/// One property of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,

    /// Primitive type tag, or the target entity name when `navigation` is set.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionKind>,

    #[serde(default)]
    pub navigation: bool,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            required: false,
            collection: None,
            navigation: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn collection(mut self, kind: CollectionKind) -> Self {
        self.collection = Some(kind);
        self
    }

    pub fn navigation(mut self) -> Self {
        self.navigation = true;
        self
    }

    /// Whether this property is the entity's primary key.
    pub fn is_key(&self) -> bool {
        self.name == KEY_PROPERTY
    }

    /// Resolve the type tag. `None` means the tag is not a known primitive
    /// (only meaningful for non-navigation properties).
    pub fn property_type(&self) -> Option<PropertyType> {
        if self.navigation {
            return Some(PropertyType::Entity(self.type_name.trim().to_string()));
        }
        self.type_name
            .parse::<PrimitiveType>()
            .ok()
            .map(PropertyType::Primitive)
    }
}

/// Resolved property type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Primitive(PrimitiveType),
    Entity(String),
}

impl PropertyType {
    /// C# element type (before nullability or collection wrapping).
    pub fn clr_name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.clr_name(),
            Self::Entity(name) => name,
        }
    }

    pub fn is_reference_type(&self) -> bool {
        match self {
            Self::Primitive(p) => p.is_reference_type(),
            Self::Entity(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_from_camel_case_json() {
        let json = r#"{
            "project": { "name": "Shop" },
            "entities": [{
                "name": "Order",
                "inheritsBase": true,
                "properties": [
                    { "name": "Total", "type": "decimal", "required": true },
                    { "name": "Lines", "type": "OrderLine", "collection": "list", "navigation": true }
                ]
            }]
        }"#;

        let request: ScaffoldRequest = serde_json::from_str(json).unwrap();
        let order = &request.entities[0];

        assert!(order.inherits_base);
        assert_eq!(order.properties.len(), 2);
        assert_eq!(order.properties[1].collection, Some(CollectionKind::List));
        assert!(order.properties[1].navigation);
    }

    #[test]
    fn property_type_resolves_primitives_and_navigation() {
        let price = PropertyDefinition::new("Price", "Decimal");
        assert_eq!(
            price.property_type(),
            Some(PropertyType::Primitive(PrimitiveType::Decimal))
        );

        let customer = PropertyDefinition::new("Customer", "Customer").navigation();
        assert_eq!(
            customer.property_type(),
            Some(PropertyType::Entity("Customer".into()))
        );

        assert_eq!(PropertyDefinition::new("X", "Customer").property_type(), None);
    }

    #[test]
    fn key_property_finds_declared_id() {
        let entity = EntityDefinition::new("Sku").with_property(PropertyDefinition::new("Id", "int"));
        assert_eq!(entity.key_property().map(|p| p.type_name.as_str()), Some("int"));
        assert!(EntityDefinition::new("Sku").key_property().is_none());
    }
}
