// ============================================================================
// domain/error.rs - request and patching errors
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected into validation reports)
/// - Categorizable (for HTTP status and CLI exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidIdentifier {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Reserved name '{name}' cannot be used for {field}")]
    ReservedName { field: String, name: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Unknown property type '{type_name}' on {entity}.{property}")]
    UnknownPropertyType {
        entity: String,
        property: String,
        type_name: String,
    },

    #[error("Navigation property {entity}.{property} references unknown entity '{target}'")]
    UnknownEntityReference {
        entity: String,
        property: String,
        target: String,
    },

    #[error("Invalid key {entity}.Id: {reason}")]
    InvalidKey { entity: String, reason: String },

    #[error("Unknown project template: {0}")]
    UnknownProjectTemplate(String),

    #[error("Unknown target framework: {0}")]
    UnknownTargetFramework(String),

    #[error("Unknown collection kind: {0}")]
    UnknownCollectionKind(String),

    #[error("Request has no entities")]
    NoEntities,

    // ========================================================================
    // Patch Errors
    // ========================================================================
    #[error("Marker '{marker}' not found")]
    MarkerNotFound { marker: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { field, .. } => vec![
                format!("'{}' must be a valid C# identifier", field),
                "Start with a letter or '_', then letters, digits or '_'".into(),
            ],
            Self::DuplicateName { kind, name } => vec![
                format!("Rename one of the {}s called '{}'", kind, name),
                "Names are compared case-insensitively".into(),
            ],
            Self::UnknownPropertyType { .. } => vec![
                "Supported types: string, int, long, short, byte, bool, decimal,".into(),
                "  double, float, datetime, dateonly, timeonly, guid, char".into(),
                "Set \"navigation\": true to reference another entity".into(),
            ],
            Self::UnknownEntityReference { target, .. } => vec![
                format!("Add an entity named '{}' to the request", target),
                "Or remove the navigation flag".into(),
            ],
            Self::InvalidKey { .. } => vec![
                "Declare Id as a single int, long, guid or string".into(),
                "Or omit it to get a generated Guid key".into(),
            ],
            Self::UnknownProjectTemplate(_) => vec!["Supported templates: clean, webapi".into()],
            Self::UnknownTargetFramework(_) => {
                vec!["Supported frameworks: net6.0, net7.0, net8.0, net9.0".into()]
            }
            Self::NoEntities => vec!["Describe at least one entity in \"entities\"".into()],
            Self::MarkerNotFound { marker } => vec![
                format!("The generated file no longer contains '{}'", marker),
                "Restore the marker comment or regenerate the file with force".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for display styling and status mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MarkerNotFound { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
