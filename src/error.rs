//! Error types for schema declaration and resource serialization.

use thiserror::Error;

/// Errors raised while declaring a serializer schema.
///
/// These surface from the declaring call itself; a builder that produced one
/// is consumed, so the invalid declaration never reaches a built schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclareError {
    #[error("attribute name \"{name}\" is reserved: the id is resolved through the id accessor")]
    ForbiddenKey { name: String },

    #[error("unknown relationship \"{to}\" for relation \"{name}\": expected one or many")]
    UnknownRelationship { name: String, to: String },
}

impl DeclareError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors raised while reading a field off a bound source object.
///
/// Any of these aborts the whole document; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    #[error("missing property at {path}")]
    MissingProperty { path: String },

    #[error("association at {path} is null")]
    NullAssociation { path: String },

    #[error("invalid association at {path}: expected {expected}, got {actual}")]
    InvalidAssociation {
        path: String,
        expected: &'static str,
        actual: String,
    },

    #[error("{message}")]
    Custom { message: String },
}

impl AccessorError {
    /// Build an error for use inside custom accessors.
    pub fn custom(message: impl Into<String>) -> Self {
        AccessorError::Custom {
            message: message.into(),
        }
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Errors while encoding or decoding a document as JSON text.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

impl EncodeError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(source: serde_json::Error) -> Self {
        EncodeError::Json { source }
    }
}
