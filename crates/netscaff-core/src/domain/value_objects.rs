//! Domain value objects: ProjectTemplate, TargetFramework, PrimitiveType,
//! CollectionKind.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each has an `as_str` (the wire/CLI spelling), a `Display` that uses it,
//! and a lenient `FromStr`. Serde goes through the same spellings so JSON
//! requests and CLI flags accept identical values.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add the C# mapping (`clr_name`, `sdk_template`, ...) here
//! 4. Done

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectTemplate ──────────────────────────────────────────────────────────

/// Shape of the generated solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectTemplate {
    /// Domain / Application / Infrastructure / Api as four projects.
    #[default]
    Clean,
    /// A single webapi project; layers are folders.
    WebApi,
}

impl ProjectTemplate {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::WebApi => "webapi",
        }
    }

    /// Whether each layer gets its own project.
    pub const fn is_multi_project(self) -> bool {
        matches!(self, Self::Clean)
    }
}

impl fmt::Display for ProjectTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectTemplate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clean" | "clean-architecture" | "cleanarchitecture" | "layered" => Ok(Self::Clean),
            "webapi" | "web-api" | "api" | "single" => Ok(Self::WebApi),
            other => Err(DomainError::UnknownProjectTemplate(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProjectTemplate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectTemplate> for String {
    fn from(value: ProjectTemplate) -> Self {
        value.as_str().to_string()
    }
}

// ── TargetFramework ──────────────────────────────────────────────────────────

/// Target framework moniker passed to `dotnet new --framework`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetFramework {
    Net6,
    Net7,
    #[default]
    Net8,
    Net9,
}

impl TargetFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Net6 => "net6.0",
            Self::Net7 => "net7.0",
            Self::Net8 => "net8.0",
            Self::Net9 => "net9.0",
        }
    }

    /// Major SDK version required to target this framework.
    pub const fn sdk_major(self) -> u32 {
        match self {
            Self::Net6 => 6,
            Self::Net7 => 7,
            Self::Net8 => 8,
            Self::Net9 => 9,
        }
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "net6.0" | "net6" | "6" | "6.0" => Ok(Self::Net6),
            "net7.0" | "net7" | "7" | "7.0" => Ok(Self::Net7),
            "net8.0" | "net8" | "8" | "8.0" => Ok(Self::Net8),
            "net9.0" | "net9" | "9" | "9.0" => Ok(Self::Net9),
            other => Err(DomainError::UnknownTargetFramework(other.to_string())),
        }
    }
}

impl TryFrom<String> for TargetFramework {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetFramework> for String {
    fn from(value: TargetFramework) -> Self {
        value.as_str().to_string()
    }
}

// ── PrimitiveType ────────────────────────────────────────────────────────────

/// Scalar property types understood by the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Int,
    Long,
    Short,
    Byte,
    Bool,
    Decimal,
    Double,
    Float,
    DateTime,
    DateOnly,
    TimeOnly,
    Guid,
    Char,
}

impl PrimitiveType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Bool => "bool",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::DateTime => "datetime",
            Self::DateOnly => "dateonly",
            Self::TimeOnly => "timeonly",
            Self::Guid => "guid",
            Self::Char => "char",
        }
    }

    /// C# spelling of the type.
    pub const fn clr_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::Byte => "byte",
            Self::Bool => "bool",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::DateTime => "DateTime",
            Self::DateOnly => "DateOnly",
            Self::TimeOnly => "TimeOnly",
            Self::Guid => "Guid",
            Self::Char => "char",
        }
    }

    /// Types EF Core maps to a primary key out of the box.
    pub const fn is_key_type(&self) -> bool {
        matches!(self, Self::Int | Self::Long | Self::Guid | Self::String)
    }

    /// `string` is the only reference type; everything else is a struct.
    pub const fn is_reference_type(&self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimitiveType {
    /// The caller knows which entity/property it was parsing and builds the
    /// real error from that.
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::String),
            "int" | "integer" | "int32" => Ok(Self::Int),
            "long" | "int64" => Ok(Self::Long),
            "short" | "int16" => Ok(Self::Short),
            "byte" => Ok(Self::Byte),
            "bool" | "boolean" => Ok(Self::Bool),
            "decimal" | "money" => Ok(Self::Decimal),
            "double" => Ok(Self::Double),
            "float" | "single" => Ok(Self::Float),
            "datetime" | "date-time" => Ok(Self::DateTime),
            "dateonly" | "date" => Ok(Self::DateOnly),
            "timeonly" | "time" => Ok(Self::TimeOnly),
            "guid" | "uuid" => Ok(Self::Guid),
            "char" => Ok(Self::Char),
            _ => Err(()),
        }
    }
}

// ── CollectionKind ───────────────────────────────────────────────────────────

/// Collection wrapper applied to a property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollectionKind {
    List,
    Collection,
    Enumerable,
    HashSet,
}

impl CollectionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Collection => "collection",
            Self::Enumerable => "enumerable",
            Self::HashSet => "hashset",
        }
    }

    /// Declared C# type for an element type.
    pub fn declare(&self, element: &str) -> String {
        match self {
            Self::List => format!("List<{element}>"),
            Self::Collection => format!("ICollection<{element}>"),
            Self::Enumerable => format!("IEnumerable<{element}>"),
            Self::HashSet => format!("HashSet<{element}>"),
        }
    }

    /// Concrete type used to initialise the property.
    pub fn concrete(&self, element: &str) -> String {
        match self {
            Self::HashSet => format!("HashSet<{element}>"),
            Self::List | Self::Collection | Self::Enumerable => format!("List<{element}>"),
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" | "array" => Ok(Self::List),
            "collection" | "icollection" => Ok(Self::Collection),
            "enumerable" | "ienumerable" => Ok(Self::Enumerable),
            "hashset" | "set" => Ok(Self::HashSet),
            other => Err(DomainError::UnknownCollectionKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for CollectionKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CollectionKind> for String {
    fn from(value: CollectionKind) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_template_from_str_accepts_aliases() {
        assert_eq!(
            "clean-architecture".parse::<ProjectTemplate>().unwrap(),
            ProjectTemplate::Clean
        );
        assert_eq!(
            "WebApi".parse::<ProjectTemplate>().unwrap(),
            ProjectTemplate::WebApi
        );
        assert!("mvc".parse::<ProjectTemplate>().is_err());
    }

    #[test]
    fn project_template_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&ProjectTemplate::WebApi).unwrap();
        assert_eq!(json, "\"webapi\"");
        let parsed: ProjectTemplate = serde_json::from_str("\"clean\"").unwrap();
        assert_eq!(parsed, ProjectTemplate::Clean);
    }

    #[test]
    fn target_framework_from_str_accepts_short_forms() {
        assert_eq!("8".parse::<TargetFramework>().unwrap(), TargetFramework::Net8);
        assert_eq!(
            "net7.0".parse::<TargetFramework>().unwrap(),
            TargetFramework::Net7
        );
        assert!("netcoreapp3.1".parse::<TargetFramework>().is_err());
    }

    #[test]
    fn target_framework_defaults_to_net8() {
        assert_eq!(TargetFramework::default().as_str(), "net8.0");
        assert_eq!(TargetFramework::default().sdk_major(), 8);
    }

    #[test]
    fn primitive_type_maps_to_clr_names() {
        assert_eq!(
            "DateTime".parse::<PrimitiveType>().unwrap().clr_name(),
            "DateTime"
        );
        assert_eq!("uuid".parse::<PrimitiveType>().unwrap().clr_name(), "Guid");
        assert_eq!("boolean".parse::<PrimitiveType>().unwrap().clr_name(), "bool");
        assert!("Customer".parse::<PrimitiveType>().is_err());
    }

    #[test]
    fn only_string_is_a_reference_type() {
        assert!(PrimitiveType::String.is_reference_type());
        assert!(!PrimitiveType::Guid.is_reference_type());
        assert!(!PrimitiveType::Decimal.is_reference_type());
    }

    #[test]
    fn collection_kind_declares_and_initialises() {
        assert_eq!(CollectionKind::Collection.declare("Order"), "ICollection<Order>");
        assert_eq!(CollectionKind::Collection.concrete("Order"), "List<Order>");
        assert_eq!(CollectionKind::HashSet.concrete("Tag"), "HashSet<Tag>");
    }
}
