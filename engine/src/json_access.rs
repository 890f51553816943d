//! Extension traits for JSON field access on value trees
//!
//! Domain objects and working copies are `serde_json::Value` trees. This
//! module provides type-safe field access plus helpers for the reserved
//! `_type` tag that names an object's schema type.

use serde_json::{Map, Value};

use crate::constants::TYPE_TAG;

/// Extension trait for type-safe JSON field access
pub trait JsonFieldAccess {
    /// Get field value using any type that can be a string reference
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value>;

    /// Get field value as string
    fn get_field_str<T: AsRef<str>>(&self, field: T) -> Option<&str>;

    /// Insert field with value using any type that converts to String and any
    /// value that can become JSON
    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>;

    /// Read the schema type name carried by this object's `_type` tag
    fn type_tag(&self) -> Option<&str> {
        self.get_field_str(TYPE_TAG)
    }
}

impl JsonFieldAccess for Value {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Self> {
        self.get(field.as_ref())
    }

    fn get_field_str<T: AsRef<str>>(&self, field: T) -> Option<&str> {
        self.get(field.as_ref()).and_then(Self::as_str)
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Self>,
    {
        if let Some(obj) = self.as_object_mut() {
            obj.insert(field.into(), value.into());
        }
    }
}

impl JsonFieldAccess for Map<String, Value> {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value> {
        self.get(field.as_ref())
    }

    fn get_field_str<T: AsRef<str>>(&self, field: T) -> Option<&str> {
        self.get(field.as_ref()).and_then(Value::as_str)
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>,
    {
        self.insert(field.into(), value.into());
    }
}
