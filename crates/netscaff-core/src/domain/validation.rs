use std::collections::HashSet;

use crate::domain::{
    entities::{
        EntityDefinition, EntityRequest, ProjectOptions, PropertyDefinition, PropertyType,
        ScaffoldRequest,
    },
    error::DomainError,
    naming::{check_dotted_name, check_identifier},
};

const MAX_PROJECT_NAME_LEN: usize = 100;

/// Members generated on `BaseEntity`; inheriting entities cannot redeclare them.
const BASE_MEMBERS: &[&str] = &["Id", "CreatedAt", "UpdatedAt"];

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities. Every
/// check collects violations instead of stopping at the first one so a
/// client can fix a payload in one round trip.
pub struct DomainValidator;

impl DomainValidator {
    /// All violations in a scaffold request.
    pub fn violations(request: &ScaffoldRequest) -> Vec<DomainError> {
        let mut errors = Self::project_violations(&request.project);

        if request.entities.is_empty() {
            errors.push(DomainError::NoEntities);
        }

        let mut seen = HashSet::new();
        for entity in &request.entities {
            if !seen.insert(entity.name.to_ascii_lowercase()) {
                errors.push(DomainError::DuplicateName {
                    kind: "entity",
                    name: entity.name.clone(),
                });
            }
        }

        let known: HashSet<&str> = request.entity_names().collect();
        for entity in &request.entities {
            errors.extend(Self::entity_violations(entity, &known));
        }

        errors
    }

    /// All violations in a single-entity request.
    pub fn entity_request_violations(request: &EntityRequest) -> Vec<DomainError> {
        let mut errors = Self::project_violations(&request.project);

        let mut known: HashSet<&str> = request.known_entities.iter().map(String::as_str).collect();
        known.insert(request.entity.name.as_str());
        errors.extend(Self::entity_violations(&request.entity, &known));

        errors
    }

    pub fn validate_request(request: &ScaffoldRequest) -> Result<(), Vec<DomainError>> {
        into_result(Self::violations(request))
    }

    pub fn validate_entity_request(request: &EntityRequest) -> Result<(), Vec<DomainError>> {
        into_result(Self::entity_request_violations(request))
    }

    pub fn project_violations(project: &ProjectOptions) -> Vec<DomainError> {
        let mut errors = Vec::new();

        if project.name.trim().is_empty() {
            errors.push(DomainError::MissingRequiredField {
                field: "project.name",
            });
            return errors;
        }

        if project.name.len() > MAX_PROJECT_NAME_LEN {
            errors.push(DomainError::InvalidIdentifier {
                field: "project name".into(),
                value: project.name.clone(),
                reason: format!("must be at most {MAX_PROJECT_NAME_LEN} characters"),
            });
        }

        if let Err(problem) = check_dotted_name(&project.name) {
            errors.push(DomainError::InvalidIdentifier {
                field: "project name".into(),
                value: project.name.clone(),
                reason: problem.describe(),
            });
        }

        errors
    }

    /// Violations of one entity; `known` holds the entity names navigation
    /// properties may reference.
    pub fn entity_violations(entity: &EntityDefinition, known: &HashSet<&str>) -> Vec<DomainError> {
        let mut errors = Vec::new();

        if let Err(problem) = check_identifier(&entity.name) {
            errors.push(DomainError::InvalidIdentifier {
                field: "entity name".into(),
                value: entity.name.clone(),
                reason: problem.describe(),
            });
        }

        if entity.name == "BaseEntity" {
            errors.push(DomainError::ReservedName {
                field: "entity name".into(),
                name: entity.name.clone(),
            });
        }

        if let Some(namespace) = &entity.namespace {
            if let Err(problem) = check_dotted_name(namespace) {
                errors.push(DomainError::InvalidIdentifier {
                    field: format!("namespace of {}", entity.name),
                    value: namespace.clone(),
                    reason: problem.describe(),
                });
            }
        }

        let mut seen = HashSet::new();
        for property in &entity.properties {
            let field = format!("property of {}", entity.name);

            if let Err(problem) = check_identifier(&property.name) {
                errors.push(DomainError::InvalidIdentifier {
                    field,
                    value: property.name.clone(),
                    reason: problem.describe(),
                });
                continue;
            }

            if !seen.insert(property.name.to_ascii_lowercase()) {
                errors.push(DomainError::DuplicateName {
                    kind: "property",
                    name: format!("{}.{}", entity.name, property.name),
                });
            }

            if property.name == entity.name {
                errors.push(DomainError::ReservedName {
                    field: format!("{field} (members cannot share the type name)"),
                    name: property.name.clone(),
                });
            }

            if entity.inherits_base && BASE_MEMBERS.contains(&property.name.as_str()) {
                errors.push(DomainError::ReservedName {
                    field: format!("{field} (declared on BaseEntity)"),
                    name: property.name.clone(),
                });
            } else if property.is_key() {
                errors.extend(key_violation(&entity.name, property));
            }

            if property.navigation {
                let target = property.type_name.trim();
                if !known.contains(target) {
                    errors.push(DomainError::UnknownEntityReference {
                        entity: entity.name.clone(),
                        property: property.name.clone(),
                        target: target.to_string(),
                    });
                }
            } else if property.property_type().is_none() {
                errors.push(DomainError::UnknownPropertyType {
                    entity: entity.name.clone(),
                    property: property.name.clone(),
                    type_name: property.type_name.clone(),
                });
            }
        }

        errors
    }
}

/// A declared key must be a single scalar of a key-capable type. Unknown
/// type tags are reported separately.
fn key_violation(entity: &str, key: &PropertyDefinition) -> Option<DomainError> {
    let reason = if key.navigation {
        "cannot be a navigation property".to_string()
    } else if key.collection.is_some() {
        "cannot be a collection".to_string()
    } else {
        match key.property_type()? {
            PropertyType::Primitive(primitive) if primitive.is_key_type() => return None,
            _ => format!("type '{}' cannot be a key; use int, long, guid or string", key.type_name),
        }
    };
    Some(DomainError::InvalidKey {
        entity: entity.to_string(),
        reason,
    })
}

fn into_result(errors: Vec<DomainError>) -> Result<(), Vec<DomainError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
