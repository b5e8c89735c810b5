//! Resource assembly - merges resolved fields into a resource document.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::AccessorError;
use crate::schema::SerializerSchema;
use crate::types::{Relationship, ResourceDocument};

/// The narrow interface a resource serializer satisfies.
///
/// [`to_document`](ResourceObject::to_document) assembles the document from
/// the other four methods; implementors normally only provide those.
pub trait ResourceObject {
    fn id(&self) -> Result<Value, AccessorError>;

    fn type_tag(&self) -> &str;

    /// Attribute values keyed by output key, in declaration order.
    fn attributes(&self) -> Result<Map<String, Value>, AccessorError>;

    /// Relationship linkages keyed by output key, in declaration order.
    fn relationships(&self) -> Result<IndexMap<String, Relationship>, AccessorError>;

    /// Assemble the resource document.
    ///
    /// Empty `attributes` and `relationships` sections are left out
    /// entirely. Any failed field fails the whole document.
    fn to_document(&self) -> Result<ResourceDocument, AccessorError> {
        let id = self.id()?;
        let attributes = self.attributes()?;
        let relationships = self.relationships()?;

        Ok(ResourceDocument {
            id,
            type_tag: self.type_tag().to_string(),
            attributes: (!attributes.is_empty()).then_some(attributes),
            relationships: (!relationships.is_empty()).then_some(relationships),
        })
    }
}

/// A source object bound to a schema.
///
/// Borrows both; created per serialize call and holds nothing else.
pub struct ResourceSerializer<'a, S: ?Sized> {
    schema: &'a SerializerSchema<S>,
    source: &'a S,
}

impl<'a, S: ?Sized> ResourceSerializer<'a, S> {
    pub fn new(schema: &'a SerializerSchema<S>, source: &'a S) -> Self {
        Self { schema, source }
    }

    pub fn schema(&self) -> &'a SerializerSchema<S> {
        self.schema
    }

    pub fn source(&self) -> &'a S {
        self.source
    }
}

impl<S: ?Sized> Clone for ResourceSerializer<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for ResourceSerializer<'_, S> {}

impl<S: ?Sized> ResourceObject for ResourceSerializer<'_, S> {
    fn id(&self) -> Result<Value, AccessorError> {
        self.schema.id_accessor().resolve(self.source)
    }

    fn type_tag(&self) -> &str {
        self.schema.type_tag()
    }

    fn attributes(&self) -> Result<Map<String, Value>, AccessorError> {
        let mut attributes = Map::new();
        for decl in self.schema.attributes().values() {
            let value = decl.accessor.resolve(self.source)?;
            attributes.insert(decl.output_key.clone(), value);
        }
        Ok(attributes)
    }

    fn relationships(&self) -> Result<IndexMap<String, Relationship>, AccessorError> {
        let mut relationships = IndexMap::new();
        for (name, decl) in self.schema.relations() {
            let relationship = decl.resolve(name, self.source)?;
            relationships.insert(decl.output_key.clone(), relationship);
        }
        Ok(relationships)
    }
}
