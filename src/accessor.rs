//! Field accessors - read values off a bound source object.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::AccessorError;

/// A source object that exposes its properties by name.
///
/// Returning `None` means the property does not exist. A present property
/// whose value is JSON `null` must be returned as `Some(Value::Null)`.
pub trait Source {
    fn property(&self, name: &str) -> Option<Value>;
}

impl Source for Map<String, Value> {
    fn property(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Only objects have properties; every lookup on another value misses.
impl Source for Value {
    fn property(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.property(name),
            _ => None,
        }
    }
}

impl<T: Source + ?Sized> Source for Box<T> {
    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }
}

type AccessorFn<S> = dyn Fn(&S) -> Result<Value, AccessorError> + Send + Sync;

/// Function reading one value off a source object.
///
/// Built once when a field is declared and invoked on every serialize call.
/// Clones share the same function.
pub struct FieldAccessor<S: ?Sized> {
    f: Arc<AccessorFn<S>>,
}

impl<S: ?Sized> FieldAccessor<S> {
    /// Wrap a custom accessor.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&S) -> Result<Value, AccessorError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Read the value off `source`.
    pub fn resolve(&self, source: &S) -> Result<Value, AccessorError> {
        (self.f)(source)
    }
}

impl<S: Source + ?Sized + 'static> FieldAccessor<S> {
    /// Accessor reading the property `name` as is.
    pub fn property(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |source: &S| read_property(source, &name))
    }
}

impl<S: ?Sized> Clone for FieldAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<S: ?Sized> fmt::Debug for FieldAccessor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldAccessor(..)")
    }
}

/// Read a property, turning a miss into `AccessorError::MissingProperty`.
pub fn read_property<S: Source + ?Sized>(source: &S, name: &str) -> Result<Value, AccessorError> {
    source
        .property(name)
        .ok_or_else(|| AccessorError::MissingProperty {
            path: name.to_string(),
        })
}
