//! Clone engine — isolated working copies of domain object graphs
//!
//! Produces a structurally-typed deep copy of a domain object (or updates
//! an existing copy in place, preserving identity for the reactive
//! substrate). Objects resolve their schema type through the `_type` tag;
//! an untagged object is a fatal error because cloning requires knowing
//! the shape. Schema-undeclared source properties are never copied,
//! mirroring the structural converter's pruning guarantee.

use error_stack::Report;
use serde_json::Value;

use super::descriptors::TypeDescriptors;
use crate::constants::ID_FIELD;
use crate::error::{Error, Result};
use crate::json_access::JsonFieldAccess;
use crate::schema::{SchemaDocument, TypeName, TypeRef};

/// Schema-driven deep-clone of tagged domain values
#[derive(Debug, Clone, Copy)]
pub struct CloneEngine<'a> {
    document:    &'a SchemaDocument,
    descriptors: &'a TypeDescriptors,
}

impl<'a> CloneEngine<'a> {
    /// Create an engine over a schema document and its clone descriptors
    pub const fn new(document: &'a SchemaDocument, descriptors: &'a TypeDescriptors) -> Self {
        Self {
            document,
            descriptors,
        }
    }

    /// Produce a fresh deep copy of a tagged domain object
    ///
    /// # Errors
    /// [`Error::MissingTypeTag`] for untagged objects, plus configuration
    /// errors when a tag names a type absent from the document.
    pub fn clone_object(&self, source: &Value) -> Result<Value> {
        self.clone_tagged(source, None)
    }

    /// Update an existing working copy in place from a tagged source
    ///
    /// Declared fields are re-copied; read-only fields and properties the
    /// schema does not declare are left untouched on the target.
    ///
    /// # Errors
    /// Same conditions as [`Self::clone_object`].
    pub fn update_object(&self, source: &Value, target: &mut Value) -> Result<()> {
        let existing = std::mem::take(target);
        *target = self.clone_tagged(source, Some(existing))?;
        Ok(())
    }

    /// Produce a fresh deep copy of a list of domain values
    ///
    /// # Errors
    /// [`Error::InvalidValue`] when the source is not an array; element
    /// errors as for [`Self::clone_object`].
    pub fn clone_list(&self, source: &Value) -> Result<Value> {
        self.clone_list_with(source, None)
    }

    /// Update an existing list working copy in place, element by element
    ///
    /// # Errors
    /// Same conditions as [`Self::clone_list`].
    pub fn update_list(&self, source: &Value, target: &mut Value) -> Result<()> {
        let existing = std::mem::take(target);
        *target = self.clone_list_with(source, Some(existing))?;
        Ok(())
    }

    fn clone_tagged(&self, source: &Value, existing: Option<Value>) -> Result<Value> {
        let Some(source_map) = source.as_object() else {
            return Err(Report::new(Error::invalid_value(
                "clone source",
                format!("expected a tagged object, got {source}"),
            )));
        };
        let Some(tag) = source_map.type_tag() else {
            return Err(Report::new(Error::missing_type_tag(format!(
                "cannot clone object {source}"
            ))));
        };
        let type_name = TypeName::from(tag);
        let type_def = self.document.require_type(&type_name)?;

        // Reuse the existing instance when updating in place; its
        // undeclared properties are the target's own state and survive
        let mut output = match existing {
            Some(Value::Object(map)) => Value::Object(map),
            _ => self.descriptors.make_object(&type_name),
        };
        output.insert_field(crate::constants::TYPE_TAG, tag);

        if let Some(id) = source_map.get_field(ID_FIELD) {
            output.insert_field(ID_FIELD, id.clone());
        }

        for field in type_def.declared_fields() {
            if field.name == ID_FIELD || self.descriptors.is_read_only(&type_name, &field.name) {
                continue;
            }
            let source_value = source_map.get(&field.name).unwrap_or(&Value::Null);
            let existing_value = output
                .as_object_mut()
                .and_then(|map| map.remove(&field.name));
            let cloned = self.clone_field(&field.type_ref, source_value, existing_value)?;
            output.insert_field(field.name.clone(), cloned);
        }
        Ok(output)
    }

    fn clone_field(
        &self,
        type_ref: &TypeRef,
        source: &Value,
        existing: Option<Value>,
    ) -> Result<Value> {
        match type_ref {
            TypeRef::NonNull(inner) => self.clone_field(inner, source, existing),
            TypeRef::Scalar(_) | TypeRef::Enum(_) => Ok(self.descriptors.clone_plain(source)),
            TypeRef::Object(_) | TypeRef::InputObject(_) => {
                if source.is_null() {
                    Ok(Value::Null)
                } else {
                    // Nested objects resolve through their own tag
                    self.clone_tagged(source, existing)
                }
            }
            TypeRef::List(inner) => {
                if source.is_null() {
                    return Ok(Value::Null);
                }
                let Some(items) = source.as_array() else {
                    return Err(Report::new(Error::invalid_value(
                        "list value",
                        format!("expected an array, got {source}"),
                    )));
                };
                let mut existing_items = match existing {
                    Some(Value::Array(values)) => values.into_iter().map(Some).collect(),
                    _ => Vec::new(),
                };
                existing_items.resize_with(items.len(), || None);
                let mut output = Vec::with_capacity(items.len());
                for (item, slot) in items.iter().zip(existing_items) {
                    output.push(self.clone_field(inner, item, slot)?);
                }
                Ok(Value::Array(output))
            }
        }
    }

    fn clone_list_with(&self, source: &Value, existing: Option<Value>) -> Result<Value> {
        let Some(items) = source.as_array() else {
            return Err(Report::new(Error::invalid_value(
                "clone source",
                format!("expected an array, got {source}"),
            )));
        };
        let mut existing_items = match existing {
            Some(Value::Array(values)) => values.into_iter().map(Some).collect(),
            _ => Vec::new(),
        };
        existing_items.resize_with(items.len(), || None);
        let mut output = Vec::with_capacity(items.len());
        for (item, slot) in items.iter().zip(existing_items) {
            let cloned = match item {
                Value::Null => Value::Null,
                Value::Object(_) => self.clone_tagged(item, slot)?,
                plain => self.descriptors.clone_plain(plain),
            };
            output.push(cloned);
        }
        Ok(Value::Array(output))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use serde_json::json;

    use super::*;

    fn document() -> SchemaDocument {
        SchemaDocument::from_json(json!({
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Doc",
                    "fields": [
                        {"name": "id", "type": {"kind": "SCALAR", "name": "Int"}},
                        {"name": "title", "type": {"kind": "SCALAR", "name": "String"}},
                        {"name": "summary", "type": {"kind": "SCALAR", "name": "String"}},
                        {"name": "sections", "type": {"kind": "LIST", "ofType": {"kind": "OBJECT", "name": "Section"}}}
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "Section",
                    "fields": [
                        {"name": "id", "type": {"kind": "SCALAR", "name": "Int"}},
                        {"name": "heading", "type": {"kind": "SCALAR", "name": "String"}}
                    ]
                },
                {"kind": "SCALAR", "name": "Int"},
                {"kind": "SCALAR", "name": "String"}
            ]
        }))
        .unwrap()
    }

    fn doc_value() -> Value {
        json!({
            "_type": "Doc",
            "id": 7,
            "title": "hello",
            "summary": "derived text",
            "sections": [
                {"_type": "Section", "id": 1, "heading": "one"},
                {"_type": "Section", "id": 2, "heading": "two"}
            ],
            "zzz": "not in schema"
        })
    }

    #[test]
    fn fresh_clone_prunes_undeclared_properties() {
        let doc = document();
        let descriptors = TypeDescriptors::new();
        let engine = CloneEngine::new(&doc, &descriptors);
        let cloned = engine.clone_object(&doc_value()).unwrap();
        assert_eq!(
            cloned,
            json!({
                "_type": "Doc",
                "id": 7,
                "title": "hello",
                "summary": "derived text",
                "sections": [
                    {"_type": "Section", "id": 1, "heading": "one"},
                    {"_type": "Section", "id": 2, "heading": "two"}
                ]
            })
        );
    }

    #[test]
    fn untagged_object_is_fatal() {
        let doc = document();
        let descriptors = TypeDescriptors::new();
        let engine = CloneEngine::new(&doc, &descriptors);
        let err = engine.clone_object(&json!({"title": "no tag"})).unwrap_err();
        assert!(matches!(err.current_context(), Error::MissingTypeTag(_)));
    }

    #[test]
    fn update_in_place_preserves_target_only_state() {
        let doc = document();
        let descriptors = TypeDescriptors::new();
        let engine = CloneEngine::new(&doc, &descriptors);
        let mut target = json!({
            "_type": "Doc",
            "title": "stale",
            "local_ui_state": "keep me"
        });
        engine.update_object(&doc_value(), &mut target).unwrap();
        assert_eq!(target["title"], json!("hello"));
        assert_eq!(target["local_ui_state"], json!("keep me"));
        assert_eq!(target["sections"][1]["heading"], json!("two"));
        assert!(target.get("zzz").is_none());
    }

    #[test]
    fn read_only_fields_are_never_clobbered() {
        let doc = document();
        let mut descriptors = TypeDescriptors::new();
        descriptors.mark_read_only("Doc", ["summary"]);
        let engine = CloneEngine::new(&doc, &descriptors);

        let mut target = json!({"_type": "Doc", "summary": "computed"});
        engine.update_object(&doc_value(), &mut target).unwrap();
        assert_eq!(target["summary"], json!("computed"));

        // On a fresh clone the derived field is simply absent
        let cloned = engine.clone_object(&doc_value()).unwrap();
        assert!(cloned.get("summary").is_none());
    }

    #[test]
    fn identifier_field_is_copied_verbatim() {
        let doc = document();
        let mut descriptors = TypeDescriptors::new();
        descriptors.mark_read_only("Doc", ["id"]);
        let engine = CloneEngine::new(&doc, &descriptors);
        let cloned = engine.clone_object(&doc_value()).unwrap();
        assert_eq!(cloned["id"], json!(7));
    }

    #[test]
    fn clone_list_maps_each_element() {
        let doc = document();
        let descriptors = TypeDescriptors::new();
        let engine = CloneEngine::new(&doc, &descriptors);
        let source = json!([
            {"_type": "Section", "id": 1, "heading": "one"},
            null
        ]);
        let cloned = engine.clone_list(&source).unwrap();
        assert_eq!(cloned, source);
    }

    #[test]
    fn update_list_reuses_existing_slots() {
        let doc = document();
        let descriptors = TypeDescriptors::new();
        let engine = CloneEngine::new(&doc, &descriptors);
        let mut target = json!([
            {"_type": "Section", "id": 1, "heading": "stale", "ui": "keep"}
        ]);
        let source = json!([
            {"_type": "Section", "id": 1, "heading": "fresh"},
            {"_type": "Section", "id": 2, "heading": "new"}
        ]);
        engine.update_list(&source, &mut target).unwrap();
        assert_eq!(target[0]["heading"], json!("fresh"));
        assert_eq!(target[0]["ui"], json!("keep"));
        assert_eq!(target[1]["id"], json!(2));
    }
}
