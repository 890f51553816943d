//! Structural conversion — schema-shaped recursion over whole value trees
//!
//! Applies the scalar converter registry across composite type references
//! to transform domain object trees to or from their editable
//! representation. The output shape is entirely determined by the schema
//! type, never by the input: properties the schema does not declare are
//! pruned.

use error_stack::Report;
use serde_json::{Map, Value};
use tracing::debug;

use super::scalars::ScalarConverters;
use crate::error::{Error, Result};
use crate::schema::{SchemaDocument, TypeRef};

/// Direction of a structural conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Domain values to user-editable values
    ToEditable,
    /// User-editable values back to domain values
    ToScalar,
}

/// Recursively convert a value against a type reference
///
/// Mirrors the type reference shape: `NON_NULL` unwraps, scalars delegate
/// to the registry in the requested direction, enums pass through, objects
/// rebuild exactly their declared fields, lists map element-wise
/// preserving order and length. `Null` composites stay `Null`.
///
/// # Errors
/// Configuration errors from the registry or document, plus
/// [`Error::InvalidValue`] when a non-null value does not match the shape
/// its type declares. There is no partial-conversion result.
pub fn convert_value(
    document: &SchemaDocument,
    converters: &ScalarConverters,
    type_ref: &TypeRef,
    value: &Value,
    direction: Direction,
) -> Result<Value> {
    match type_ref {
        TypeRef::NonNull(inner) => convert_value(document, converters, inner, value, direction),
        TypeRef::Scalar(name) => match direction {
            Direction::ToEditable => converters.to_editable(name, value),
            Direction::ToScalar => converters.to_scalar(name, value),
        },
        // Membership validation is a separate concern; enum values pass through
        TypeRef::Enum(_) => Ok(value.clone()),
        TypeRef::Object(name) | TypeRef::InputObject(name) => {
            convert_object(document, converters, name, value, direction)
        }
        TypeRef::List(inner) => convert_list(document, converters, inner, value, direction),
    }
}

fn convert_object(
    document: &SchemaDocument,
    converters: &ScalarConverters,
    name: &crate::schema::TypeName,
    value: &Value,
    direction: Direction,
) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let Some(input) = value.as_object() else {
        return Err(Report::new(Error::invalid_value(
            "object value",
            format!("expected an object for type {name}"),
        )));
    };
    let type_def = document.require_type(name)?;

    let declared: usize = type_def.declared_fields().count();
    if input.len() > declared + 1 {
        debug!(type_name = %name, "pruning undeclared properties during conversion");
    }

    let mut output = Map::new();
    for field in type_def.declared_fields() {
        let field_value = input.get(&field.name).unwrap_or(&Value::Null);
        let converted = convert_value(document, converters, &field.type_ref, field_value, direction)?;
        output.insert(field.name.clone(), converted);
    }
    Ok(Value::Object(output))
}

fn convert_list(
    document: &SchemaDocument,
    converters: &ScalarConverters,
    element: &TypeRef,
    value: &Value,
    direction: Direction,
) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let Some(items) = value.as_array() else {
        return Err(Report::new(Error::invalid_value(
            "list value",
            format!("expected an array, got {value}"),
        )));
    };
    let mut output = Vec::with_capacity(items.len());
    for item in items {
        output.push(convert_value(document, converters, element, item, direction)?);
    }
    Ok(Value::Array(output))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use serde_json::json;

    use super::*;
    use crate::schema::TypeName;

    fn document() -> SchemaDocument {
        SchemaDocument::from_json(json!({
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Foo",
                    "fields": [
                        {"name": "a", "type": {"kind": "SCALAR", "name": "Int"}},
                        {"name": "b", "type": {"kind": "SCALAR", "name": "Int"}}
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "Bar",
                    "fields": [
                        {"name": "title", "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}}},
                        {"name": "foos", "type": {"kind": "LIST", "ofType": {"kind": "OBJECT", "name": "Foo"}}},
                        {"name": "color", "type": {"kind": "ENUM", "name": "Color"}}
                    ]
                },
                {"kind": "SCALAR", "name": "Int"},
                {"kind": "SCALAR", "name": "String"},
                {"kind": "ENUM", "name": "Color", "enumValues": [{"name": "RED"}]}
            ]
        }))
        .unwrap()
    }

    fn convert(type_name: &str, value: &Value, direction: Direction) -> Result<Value> {
        let doc = document();
        let type_ref = TypeRef::Object(TypeName::from(type_name));
        convert_value(
            &doc,
            &ScalarConverters::builtin(),
            &type_ref,
            value,
            direction,
        )
    }

    #[test]
    fn undeclared_properties_are_pruned() {
        let converted = convert(
            "Foo",
            &json!({"_type": "Foo", "a": 1, "b": 2, "zzz": "extra"}),
            Direction::ToEditable,
        )
        .unwrap();
        assert_eq!(converted, json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn null_composites_stay_null() {
        assert_eq!(
            convert("Foo", &Value::Null, Direction::ToEditable).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn missing_fields_convert_as_null() {
        let converted = convert("Foo", &json!({"a": 5}), Direction::ToEditable).unwrap();
        assert_eq!(converted, json!({"a": "5", "b": ""}));
    }

    #[test]
    fn lists_preserve_order_and_length() {
        let converted = convert(
            "Bar",
            &json!({
                "title": "doc",
                "foos": [{"a": 1}, {"a": 2}, null],
                "color": "RED"
            }),
            Direction::ToEditable,
        )
        .unwrap();
        assert_eq!(
            converted,
            json!({
                "title": "doc",
                "foos": [{"a": "1", "b": ""}, {"a": "2", "b": ""}, null],
                "color": "RED"
            })
        );
    }

    #[test]
    fn editable_trees_convert_back_to_domain() {
        let converted = convert(
            "Foo",
            &json!({"a": "7", "b": ""}),
            Direction::ToScalar,
        )
        .unwrap();
        assert_eq!(converted, json!({"a": 7, "b": null}));
    }

    #[test]
    fn enum_values_pass_through_unconverted() {
        let converted = convert(
            "Bar",
            &json!({"title": "x", "foos": null, "color": "RED"}),
            Direction::ToScalar,
        )
        .unwrap();
        assert_eq!(converted["color"], json!("RED"));
    }

    #[test]
    fn shape_mismatches_are_structural_errors() {
        let err = convert("Foo", &json!([1, 2]), Direction::ToEditable).unwrap_err();
        assert!(matches!(err.current_context(), Error::InvalidValue(_)));
        let err = convert(
            "Bar",
            &json!({"title": "x", "foos": {"not": "an array"}, "color": null}),
            Direction::ToEditable,
        )
        .unwrap_err();
        assert!(matches!(err.current_context(), Error::InvalidValue(_)));
    }
}
