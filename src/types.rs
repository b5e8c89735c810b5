//! Core types for resource documents.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name reserved for the resource identifier.
pub const ID_KEY: &str = "id";

/// Suffix stripped from definition names when deriving a type tag.
pub const SERIALIZER_SUFFIX: &str = "Serializer";

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Derive the default type tag from a serializer definition name.
///
/// Takes the last `::` segment, strips a trailing `Serializer` and
/// lower-cases the rest: `"api::UserSerializer"` becomes `"user"`.
pub fn default_type_tag(name: &str) -> String {
    let segment = name.rsplit("::").next().unwrap_or(name);
    match segment.strip_suffix(SERIALIZER_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_lowercase(),
        _ => segment.to_lowercase(),
    }
}

/// Cardinality of a relation.
///
/// Decides whether the resolved relationship is one linkage or a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    /// Parse a cardinality from its declared name.
    ///
    /// Matching is case-insensitive. Returns `None` for unknown values
    /// (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "one" => Some(Cardinality::One),
            "many" => Some(Cardinality::Many),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
        }
    }
}

impl FromStr for Cardinality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cardinality::parse(s).ok_or_else(|| s.to_string())
    }
}

/// Pointer to another resource: id and type only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    pub id: Value,
    #[serde(rename = "type")]
    pub type_tag: String,
}

/// Relationship linkage stub, `{ "data": { "id": .., "type": .. } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinkage {
    pub data: ResourceIdentifier,
}

impl ResourceLinkage {
    pub fn new(id: Value, type_tag: impl Into<String>) -> Self {
        Self {
            data: ResourceIdentifier {
                id,
                type_tag: type_tag.into(),
            },
        }
    }
}

/// Resolved value of one relationship.
///
/// A to-many relation is a bare sequence of single linkages, not one
/// linkage whose `data` is an array. Consumers depend on this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relationship {
    One(ResourceLinkage),
    Many(Vec<ResourceLinkage>),
}

impl Relationship {
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Relationship::One(_) => Cardinality::One,
            Relationship::Many(_) => Cardinality::Many,
        }
    }
}

/// A single serialized resource object.
///
/// `attributes` and `relationships` are `None` when the schema declares no
/// field for that section; they are never present and empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDocument {
    pub id: Value,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, Relationship>>,
}
