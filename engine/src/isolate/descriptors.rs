//! Per-type clone descriptors — read-only fields and extension hooks
//!
//! Read-only/derived field names are declared explicitly per domain type
//! instead of probed at runtime; the clone engine skips them so computed
//! fields are never clobbered. Callers integrating custom domain class
//! hierarchies may replace the object-construction factory and the clone
//! function for plain (non-typed) values.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::constants::TYPE_TAG;
use crate::schema::TypeName;

/// Factory producing a fresh, empty instance of a domain type
pub type ObjectFactory = Arc<dyn Fn(&TypeName) -> Value + Send + Sync>;

/// Clone function for plain scalar/enum values
pub type PlainClone = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Declared clone behavior for the domain types in a schema
#[derive(Clone, Default)]
pub struct TypeDescriptors {
    read_only:   HashMap<TypeName, HashSet<String>>,
    factory:     Option<ObjectFactory>,
    plain_clone: Option<PlainClone>,
}

impl TypeDescriptors {
    /// Descriptors with no read-only fields and default hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare read-only/derived field names for a domain type
    ///
    /// Extends any previously declared set for the same type.
    pub fn mark_read_only<I, S>(&mut self, type_name: impl Into<TypeName>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read_only
            .entry(type_name.into())
            .or_default()
            .extend(fields.into_iter().map(Into::into));
    }

    /// Whether a field of a type is declared read-only
    pub fn is_read_only(&self, type_name: &TypeName, field: &str) -> bool {
        self.read_only
            .get(type_name)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Replace the default object-construction factory
    pub fn set_object_factory(
        &mut self,
        factory: impl Fn(&TypeName) -> Value + Send + Sync + 'static,
    ) {
        self.factory = Some(Arc::new(factory));
    }

    /// Replace the default clone function for plain values
    pub fn set_plain_clone(&mut self, clone: impl Fn(&Value) -> Value + Send + Sync + 'static) {
        self.plain_clone = Some(Arc::new(clone));
    }

    /// Construct a fresh instance of a domain type
    pub fn make_object(&self, type_name: &TypeName) -> Value {
        self.factory.as_ref().map_or_else(
            || {
                let mut map = Map::new();
                map.insert(TYPE_TAG.to_string(), Value::from(type_name));
                Value::Object(map)
            },
            |factory| factory(type_name),
        )
    }

    /// Copy a plain (non-typed) value
    pub fn clone_plain(&self, value: &Value) -> Value {
        self.plain_clone
            .as_ref()
            .map_or_else(|| value.clone(), |clone| clone(value))
    }
}

impl std::fmt::Debug for TypeDescriptors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptors")
            .field("read_only", &self.read_only)
            .field("factory", &self.factory.is_some())
            .field("plain_clone", &self.plain_clone.is_some())
            .finish()
    }
}
