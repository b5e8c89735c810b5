//! JSON:API Resource Serializer
//!
//! Declarative serialization of domain objects into JSON:API resource
//! objects: an id, a type, attributes, and relationship linkages.
//!
//! A schema is declared once with [`SchemaBuilder`] and can then serialize
//! any number of source objects, from any number of threads.
//!
//! # Example
//!
//! ```
//! use jsonapi_resource::{RelationOptions, SchemaBuilder, SerializerSchema};
//! use serde_json::json;
//!
//! let schema: SerializerSchema = SchemaBuilder::new("UserSerializer")
//!     .type_tag("users")
//!     .attribute("email")?
//!     .relation("department", RelationOptions::one("departments"))?
//!     .has_many("roles", "roles")
//!     .build();
//!
//! let user = json!({
//!     "id": 7,
//!     "email": "a@b.com",
//!     "department": { "id": 3 },
//!     "roles": [{ "id": 1 }, { "id": 2 }]
//! });
//!
//! let document = schema.serialize(&user).unwrap();
//! let encoded = jsonapi_resource::to_value(&document).unwrap();
//!
//! assert_eq!(encoded["attributes"], json!({ "email": "a@b.com" }));
//! assert_eq!(
//!     encoded["relationships"]["department"],
//!     json!({ "data": { "id": 3, "type": "departments" } })
//! );
//! assert_eq!(
//!     encoded["relationships"]["roles"][1],
//!     json!({ "data": { "id": 2, "type": "roles" } })
//! );
//! # Ok::<(), jsonapi_resource::DeclareError>(())
//! ```
//!
//! # Document Shape
//!
//! | Section | Present when | Value |
//! |---------|--------------|-------|
//! | `id` | always | id accessor result |
//! | `type` | always | type tag |
//! | `attributes` | at least one attribute declared | `{ key: value }` |
//! | `relationships` | at least one relation declared | see below |
//!
//! A to-one relation resolves to `{ "data": { "id", "type" } }`. A to-many
//! relation resolves to a list of such objects, one per related id, not to a
//! single object with an array under `data`.
//!
//! # Source Objects
//!
//! Anything implementing [`Source`] can be serialized. `serde_json::Value`
//! works out of the box; domain types expose their properties by name:
//!
//! ```
//! use jsonapi_resource::{SchemaBuilder, Source};
//! use serde_json::{json, Value};
//!
//! struct Role { id: u32, label: String }
//!
//! impl Source for Role {
//!     fn property(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "id" => Some(json!(self.id)),
//!             "label" => Some(json!(self.label)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let schema = SchemaBuilder::<Role>::new("RoleSerializer").attribute("label")?.build();
//! let role = Role { id: 1, label: "admin".into() };
//!
//! let document = schema.serialize(&role).unwrap();
//! assert_eq!(document.type_tag, "role");
//! # Ok::<(), jsonapi_resource::DeclareError>(())
//! ```

mod accessor;
mod assembler;
mod encoder;
mod error;
mod relation;
mod schema;
mod types;

pub use accessor::{read_property, FieldAccessor, Source};
pub use assembler::{ResourceObject, ResourceSerializer};
pub use encoder::{from_str, to_string, to_string_pretty, to_value};
pub use error::{AccessorError, DeclareError, EncodeError};
pub use relation::{to_many_ids, to_one_id};
pub use schema::{
    AttributeDecl, AttributeOptions, RelationDecl, RelationOptions, SchemaBuilder,
    SerializerSchema,
};
pub use types::{
    default_type_tag, json_type_name, Cardinality, Relationship, ResourceDocument,
    ResourceIdentifier, ResourceLinkage, ID_KEY,
};
