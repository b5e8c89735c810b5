//! Serializer schemas and their declaration.
//!
//! A [`SchemaBuilder`] collects declarations in order and freezes them into
//! an immutable [`SerializerSchema`]. Fallible declarations consume the
//! builder, so a rejected declaration can never end up in a built schema.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::accessor::{FieldAccessor, Source};
use crate::assembler::ResourceSerializer;
use crate::error::{AccessorError, DeclareError};
use crate::relation::{to_many_ids, to_one_id};
use crate::types::{default_type_tag, Cardinality, ResourceDocument, ID_KEY};

/// A declared attribute.
pub struct AttributeDecl<S: ?Sized> {
    /// Key used in the `attributes` section.
    pub output_key: String,
    pub accessor: FieldAccessor<S>,
}

/// A declared relation.
pub struct RelationDecl<S: ?Sized> {
    /// Key used in the `relationships` section.
    pub output_key: String,
    /// Type tag written into every linkage.
    pub target_type: String,
    pub cardinality: Cardinality,
    /// Yields one identifier for `One`, a JSON array of identifiers for `Many`.
    pub id_accessor: FieldAccessor<S>,
}

impl<S: ?Sized> Clone for AttributeDecl<S> {
    fn clone(&self) -> Self {
        Self {
            output_key: self.output_key.clone(),
            accessor: self.accessor.clone(),
        }
    }
}

impl<S: ?Sized> Clone for RelationDecl<S> {
    fn clone(&self) -> Self {
        Self {
            output_key: self.output_key.clone(),
            target_type: self.target_type.clone(),
            cardinality: self.cardinality,
            id_accessor: self.id_accessor.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for AttributeDecl<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDecl")
            .field("output_key", &self.output_key)
            .finish_non_exhaustive()
    }
}

impl<S: ?Sized> fmt::Debug for RelationDecl<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationDecl")
            .field("output_key", &self.output_key)
            .field("target_type", &self.target_type)
            .field("cardinality", &self.cardinality)
            .finish_non_exhaustive()
    }
}

/// Options for an attribute declaration.
pub struct AttributeOptions<S: ?Sized> {
    /// Output key; defaults to the attribute name.
    pub key: Option<String>,
    /// Custom accessor; defaults to reading the property of the same name.
    pub accessor: Option<FieldAccessor<S>>,
}

impl<S: ?Sized> AttributeOptions<S> {
    pub fn new() -> Self {
        Self {
            key: None,
            accessor: None,
        }
    }

    /// Rename the output field.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Read the value with a custom function instead of the named property.
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&S) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        self.accessor = Some(FieldAccessor::new(f));
        self
    }
}

impl<S: ?Sized> Default for AttributeOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for a relation declaration.
pub struct RelationOptions<S: ?Sized> {
    /// Type tag of the related resources.
    pub target_type: String,
    /// Declared cardinality, `"one"` or `"many"` (case-insensitive).
    pub to: String,
    /// Output key; defaults to the relation name.
    pub key: Option<String>,
    /// Custom id accessor; must yield a JSON array for to-many relations.
    pub id_accessor: Option<FieldAccessor<S>>,
}

impl<S: ?Sized> RelationOptions<S> {
    /// Create relation options. `to` is validated when the relation is declared.
    pub fn new(target_type: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            to: to.into(),
            key: None,
            id_accessor: None,
        }
    }

    pub fn one(target_type: impl Into<String>) -> Self {
        Self::new(target_type, Cardinality::One.as_str())
    }

    pub fn many(target_type: impl Into<String>) -> Self {
        Self::new(target_type, Cardinality::Many.as_str())
    }

    /// Rename the output field.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Resolve the related id with a custom function.
    pub fn id_accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&S) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        self.id_accessor = Some(FieldAccessor::new(f));
        self
    }

    /// Resolve the related ids with a custom function returning a JSON array.
    pub fn ids_accessor<F>(self, f: F) -> Self
    where
        F: Fn(&S) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        self.id_accessor(f)
    }
}

/// Immutable description of how to serialize one kind of source object.
///
/// Built once through [`SchemaBuilder`]. Safe to share between threads;
/// serializing only reads from it.
pub struct SerializerSchema<S: ?Sized = Value> {
    name: String,
    type_tag: String,
    id_accessor: FieldAccessor<S>,
    attributes: IndexMap<String, AttributeDecl<S>>,
    relations: IndexMap<String, RelationDecl<S>>,
}

impl<S: ?Sized> SerializerSchema<S> {
    /// Name of the serializer definition.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn id_accessor(&self) -> &FieldAccessor<S> {
        &self.id_accessor
    }

    /// Declared attributes by name, in declaration order.
    pub fn attributes(&self) -> &IndexMap<String, AttributeDecl<S>> {
        &self.attributes
    }

    /// Declared relations by name, in declaration order.
    pub fn relations(&self) -> &IndexMap<String, RelationDecl<S>> {
        &self.relations
    }

    /// Bind a source object to this schema.
    pub fn bind<'a>(&'a self, source: &'a S) -> ResourceSerializer<'a, S> {
        ResourceSerializer::new(self, source)
    }

    /// Serialize `source` into a resource document.
    ///
    /// # Errors
    ///
    /// Returns the first `AccessorError` raised by any field; no partial
    /// document is produced.
    pub fn serialize(&self, source: &S) -> Result<ResourceDocument, AccessorError> {
        use crate::assembler::ResourceObject;

        self.bind(source).to_document()
    }

    /// Start a derived definition that inherits this schema's fields.
    pub fn derive(&self, name: impl Into<String>) -> SchemaBuilder<S> {
        SchemaBuilder::derive(name, self)
    }
}

impl<S: ?Sized> Clone for SerializerSchema<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            type_tag: self.type_tag.clone(),
            id_accessor: self.id_accessor.clone(),
            attributes: self.attributes.clone(),
            relations: self.relations.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for SerializerSchema<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerSchema")
            .field("name", &self.name)
            .field("type_tag", &self.type_tag)
            .field("attributes", &self.attributes)
            .field("relations", &self.relations)
            .finish_non_exhaustive()
    }
}

/// Collects declarations for a [`SerializerSchema`].
pub struct SchemaBuilder<S: ?Sized = Value> {
    schema: SerializerSchema<S>,
}

impl<S: Source + ?Sized + 'static> SchemaBuilder<S> {
    /// Start a definition named `name`.
    ///
    /// The type tag defaults to the name without its `Serializer` suffix,
    /// lower-cased; the id is read from the `id` property.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            schema: SerializerSchema {
                type_tag: default_type_tag(&name),
                name,
                id_accessor: FieldAccessor::property(ID_KEY),
                attributes: IndexMap::new(),
                relations: IndexMap::new(),
            },
        }
    }

    /// Read the id from property `name`.
    pub fn id_field(mut self, name: impl Into<String>) -> Self {
        self.schema.id_accessor = FieldAccessor::property(name);
        self
    }

    /// Declare an attribute read from the property of the same name.
    ///
    /// # Errors
    ///
    /// Returns `DeclareError::ForbiddenKey` if `name` is `"id"`.
    pub fn attribute(self, name: &str) -> Result<Self, DeclareError> {
        self.attribute_with(name, AttributeOptions::new())
    }

    /// Declare an attribute with options.
    ///
    /// # Errors
    ///
    /// Returns `DeclareError::ForbiddenKey` if `name` is `"id"`.
    pub fn attribute_with(
        mut self,
        name: &str,
        options: AttributeOptions<S>,
    ) -> Result<Self, DeclareError> {
        if name == ID_KEY {
            return Err(DeclareError::ForbiddenKey {
                name: name.to_string(),
            });
        }

        let decl = AttributeDecl {
            output_key: options.key.unwrap_or_else(|| name.to_string()),
            accessor: options
                .accessor
                .unwrap_or_else(|| FieldAccessor::property(name)),
        };
        self.schema.attributes.insert(name.to_string(), decl);
        Ok(self)
    }

    /// Declare a relation.
    ///
    /// Without a custom accessor, a to-one relation reads `source[name].id`
    /// and a to-many relation reads the `id` of every element of
    /// `source[name]`.
    ///
    /// # Errors
    ///
    /// Returns `DeclareError::UnknownRelationship` if `options.to` is
    /// neither `one` nor `many`.
    pub fn relation(
        mut self,
        name: &str,
        options: RelationOptions<S>,
    ) -> Result<Self, DeclareError> {
        let Some(cardinality) = Cardinality::parse(&options.to) else {
            return Err(DeclareError::UnknownRelationship {
                name: name.to_string(),
                to: options.to,
            });
        };

        let id_accessor = match (options.id_accessor, cardinality) {
            (Some(accessor), _) => accessor,
            (None, Cardinality::One) => to_one_id(name),
            (None, Cardinality::Many) => to_many_ids(name),
        };

        let decl = RelationDecl {
            output_key: options.key.unwrap_or_else(|| name.to_string()),
            target_type: options.target_type,
            cardinality,
            id_accessor,
        };
        self.schema.relations.insert(name.to_string(), decl);
        Ok(self)
    }

    /// Declare a to-one relation with default options.
    pub fn has_one(self, name: &str, target_type: impl Into<String>) -> Self {
        self.relation_typed(name, Cardinality::One, target_type)
    }

    /// Declare a to-many relation with default options.
    pub fn has_many(self, name: &str, target_type: impl Into<String>) -> Self {
        self.relation_typed(name, Cardinality::Many, target_type)
    }

    fn relation_typed(
        mut self,
        name: &str,
        cardinality: Cardinality,
        target_type: impl Into<String>,
    ) -> Self {
        let id_accessor = match cardinality {
            Cardinality::One => to_one_id(name),
            Cardinality::Many => to_many_ids(name),
        };
        let decl = RelationDecl {
            output_key: name.to_string(),
            target_type: target_type.into(),
            cardinality,
            id_accessor,
        };
        self.schema.relations.insert(name.to_string(), decl);
        self
    }
}

impl<S: ?Sized> SchemaBuilder<S> {
    /// Start a definition named `name` that inherits from `parent`.
    ///
    /// The attribute and relation maps are copied, so declarations on the
    /// new definition never show up in `parent`. The id accessor is
    /// inherited; the type tag is derived from `name`.
    pub fn derive(name: impl Into<String>, parent: &SerializerSchema<S>) -> Self {
        let name = name.into();
        Self {
            schema: SerializerSchema {
                type_tag: default_type_tag(&name),
                name,
                id_accessor: parent.id_accessor.clone(),
                attributes: parent.attributes.clone(),
                relations: parent.relations.clone(),
            },
        }
    }

    /// Override the type tag.
    pub fn type_tag(mut self, tag: impl Into<String>) -> Self {
        self.schema.type_tag = tag.into();
        self
    }

    /// Resolve the id with a custom function.
    pub fn id_accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&S) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        self.schema.id_accessor = FieldAccessor::new(f);
        self
    }

    /// Freeze the declarations.
    pub fn build(self) -> SerializerSchema<S> {
        self.schema
    }
}
