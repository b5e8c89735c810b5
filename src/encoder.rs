//! JSON encoding of resource documents.
//!
//! The document itself is the primary result of serialization; these are
//! thin helpers for callers that want text or a `serde_json::Value`.

use serde_json::Value;

use crate::error::EncodeError;
use crate::types::ResourceDocument;

/// Convert a document into a JSON value, e.g. to embed it in a larger document.
pub fn to_value(document: &ResourceDocument) -> Result<Value, EncodeError> {
    Ok(serde_json::to_value(document)?)
}

/// Encode a document as compact JSON text.
pub fn to_string(document: &ResourceDocument) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(document)?)
}

/// Encode a document as indented JSON text.
pub fn to_string_pretty(document: &ResourceDocument) -> Result<String, EncodeError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Decode a document from JSON text.
///
/// # Errors
///
/// Returns `EncodeError::Json` if the text is not valid JSON or does not
/// have the resource-object shape.
pub fn from_str(content: &str) -> Result<ResourceDocument, EncodeError> {
    Ok(serde_json::from_str(content)?)
}
