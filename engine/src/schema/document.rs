//! Schema document — the ordered collection of named type definitions
//!
//! Consumed, not produced: the caller supplies the document as JSON in the
//! `{ "types": [ {kind, name, fields?, inputFields?, enumValues?}, ... ] }`
//! form. Created once at startup and read-only thereafter.

use serde::Deserialize;
use serde_json::Value;

use super::type_ref::{TypeKind, TypeName, TypeRef};
use crate::error::{Error, Result};

/// A single field declaration inside a type definition
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    /// Field name, matched exactly during lookup
    pub name:     String,
    /// The declared type of the field
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

/// A single enum value declaration
#[derive(Debug, Clone, Deserialize)]
pub struct EnumValueDef {
    /// The enum value literal
    pub name: String,
}

/// A named type definition in the schema document
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
    /// Kind discriminant — `OBJECT`, `INPUT_OBJECT`, `SCALAR` or `ENUM`
    pub kind:         TypeKind,
    /// Unique name within the document
    pub name:         TypeName,
    /// Field list for output object types
    #[serde(default)]
    pub fields:       Vec<FieldDef>,
    /// Field list for input object types
    #[serde(default, rename = "inputFields")]
    pub input_fields: Vec<FieldDef>,
    /// Declared values for enum types
    #[serde(default, rename = "enumValues")]
    pub enum_values:  Vec<EnumValueDef>,
}

impl TypeDef {
    /// Look up a declared field by exact name, first match wins
    ///
    /// Searches `fields` then `inputFields`, so the same lookup serves both
    /// output and input object types. O(n) over the field list — acceptable
    /// given small schemas.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .chain(self.input_fields.iter())
            .find(|field| field.name == name)
    }

    /// Iterate every declared field, output fields first
    pub fn declared_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().chain(self.input_fields.iter())
    }

    /// A type reference pointing at this definition
    pub fn as_type_ref(&self) -> TypeRef {
        match self.kind {
            TypeKind::Enum => TypeRef::Enum(self.name.clone()),
            TypeKind::Object => TypeRef::Object(self.name.clone()),
            TypeKind::InputObject => TypeRef::InputObject(self.name.clone()),
            // wrapper kinds are rejected at document load
            _ => TypeRef::Scalar(self.name.clone()),
        }
    }
}

/// An ordered collection of named type definitions
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDocument {
    /// The type definitions, in document order
    pub types: Vec<TypeDef>,
}

impl SchemaDocument {
    /// Parse a schema document from its JSON wire form
    ///
    /// # Errors
    /// Returns [`Error::SchemaInvalid`] when the JSON does not match the
    /// document shape or when two definitions share a name.
    pub fn from_json(value: Value) -> Result<Self> {
        let document: Self = serde_json::from_value(value)
            .map_err(|err| Error::SchemaInvalid(format!("malformed schema document: {err}")))?;
        document.check_unique_names()?;
        document.check_definition_kinds()?;
        Ok(document)
    }

    /// Look up a type definition by name, first match wins
    pub fn type_def(&self, name: &TypeName) -> Option<&TypeDef> {
        self.types.iter().find(|def| &def.name == name)
    }

    /// Look up a type definition or fail with a configuration error
    ///
    /// # Errors
    /// Returns [`Error::UnknownType`] when the name is not in the document.
    pub fn require_type(&self, name: &TypeName) -> Result<&TypeDef> {
        self.type_def(name).ok_or_else(|| {
            error_stack::Report::new(Error::UnknownType {
                type_name: name.clone(),
            })
        })
    }

    fn check_unique_names(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for def in &self.types {
            if !seen.insert(def.name.as_str()) {
                return Err(error_stack::Report::new(Error::SchemaInvalid(format!(
                    "duplicate type name: {}",
                    def.name
                ))));
            }
        }
        Ok(())
    }

    // Wrapper kinds only appear nested inside field type references
    fn check_definition_kinds(&self) -> Result<()> {
        for def in &self.types {
            if matches!(def.kind, TypeKind::List | TypeKind::NonNull) {
                return Err(error_stack::Report::new(Error::SchemaInvalid(format!(
                    "wrapper kind {} cannot be declared as the named type {}",
                    def.kind, def.name
                ))));
            }
        }
        Ok(())
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
                    "name": "DomainType",
                    "fields": [
                        {"name": "name", "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}}},
                        {"name": "maxLength", "type": {"kind": "SCALAR", "name": "Int"}}
                    ]
                },
                {
                    "kind": "INPUT_OBJECT",
                    "name": "DomainTypeInput",
                    "inputFields": [
                        {"name": "name", "type": {"kind": "SCALAR", "name": "String"}}
                    ]
                },
                {"kind": "SCALAR", "name": "String"},
                {"kind": "SCALAR", "name": "Int"},
                {"kind": "ENUM", "name": "Color", "enumValues": [{"name": "RED"}, {"name": "BLUE"}]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn type_lookup_by_name() {
        let doc = document();
        assert!(doc.type_def(&TypeName::from("DomainType")).is_some());
        assert!(doc.type_def(&TypeName::from("Nope")).is_none());
    }

    #[test]
    fn field_lookup_covers_input_fields() {
        let doc = document();
        let input = doc.type_def(&TypeName::from("DomainTypeInput")).unwrap();
        assert!(input.field("name").is_some());
        assert!(input.field("missing").is_none());
    }

    #[test]
    fn enum_values_are_parsed() {
        let doc = document();
        let color = doc.type_def(&TypeName::from("Color")).unwrap();
        assert_eq!(color.enum_values.len(), 2);
        assert_eq!(color.enum_values[0].name, "RED");
    }

    #[test]
    fn duplicate_type_names_are_rejected() {
        let result = SchemaDocument::from_json(json!({
            "types": [
                {"kind": "SCALAR", "name": "Int"},
                {"kind": "SCALAR", "name": "Int"}
            ]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn wrapper_kinds_cannot_be_named_definitions() {
        for kind in ["LIST", "NON_NULL"] {
            let result = SchemaDocument::from_json(json!({
                "types": [{"kind": kind, "name": "Wrapped"}]
            }));
            assert!(result.is_err(), "kind {kind}");
        }
    }

    #[test]
    fn require_type_reports_unknown_type() {
        let doc = document();
        let err = doc.require_type(&TypeName::from("Ghost")).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::UnknownType { .. }
        ));
    }
}
