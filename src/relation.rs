//! Relationship resolution - identifiers wrapped into linkage stubs.

use serde_json::Value;

use crate::accessor::{read_property, FieldAccessor, Source};
use crate::error::AccessorError;
use crate::schema::RelationDecl;
use crate::types::{json_type_name, Cardinality, Relationship, ResourceLinkage, ID_KEY};

/// Default to-one accessor: reads `source[name].id`.
pub fn to_one_id<S: Source + ?Sized + 'static>(name: impl Into<String>) -> FieldAccessor<S> {
    let name = name.into();
    FieldAccessor::new(move |source: &S| {
        let association = read_property(source, &name)?;
        association_id(&association, &name)
    })
}

/// Default to-many accessor: reads the `id` of every element of `source[name]`.
///
/// Yields a JSON array; order and duplicates are kept.
pub fn to_many_ids<S: Source + ?Sized + 'static>(name: impl Into<String>) -> FieldAccessor<S> {
    let name = name.into();
    FieldAccessor::new(move |source: &S| match read_property(source, &name)? {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| association_id(item, &format!("{}[{}]", name, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Null => Err(AccessorError::NullAssociation { path: name.clone() }),
        other => Err(AccessorError::InvalidAssociation {
            path: name.clone(),
            expected: "array",
            actual: json_type_name(&other).to_string(),
        }),
    })
}

impl<S: ?Sized> RelationDecl<S> {
    /// Resolve the relation `name` on `source` into its linkage value.
    ///
    /// A to-many relation produces one linkage per identifier, in the order
    /// the accessor returned them.
    pub fn resolve(&self, name: &str, source: &S) -> Result<Relationship, AccessorError> {
        let ids = self.id_accessor.resolve(source)?;

        match self.cardinality {
            Cardinality::One => Ok(Relationship::One(ResourceLinkage::new(
                ids,
                self.target_type.clone(),
            ))),
            Cardinality::Many => match ids {
                Value::Array(ids) => Ok(Relationship::Many(
                    ids.into_iter()
                        .map(|id| ResourceLinkage::new(id, self.target_type.clone()))
                        .collect(),
                )),
                other => Err(AccessorError::InvalidAssociation {
                    path: name.to_string(),
                    expected: "array",
                    actual: json_type_name(&other).to_string(),
                }),
            },
        }
    }
}

// --- Internal implementation ---

fn association_id(association: &Value, path: &str) -> Result<Value, AccessorError> {
    match association {
        Value::Object(map) => {
            map.get(ID_KEY)
                .cloned()
                .ok_or_else(|| AccessorError::MissingProperty {
                    path: format!("{}.{}", path, ID_KEY),
                })
        }
        Value::Null => Err(AccessorError::NullAssociation {
            path: path.to_string(),
        }),
        other => Err(AccessorError::InvalidAssociation {
            path: path.to_string(),
            expected: "object",
            actual: json_type_name(other).to_string(),
        }),
    }
}
