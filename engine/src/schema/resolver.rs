//! Type graph resolution — walk a field path against the schema
//!
//! Pure function over the schema document: no side effects, no caching.
//! Resolution failures are configuration errors and abort the operation
//! that triggered them.

use error_stack::Report;

use super::document::SchemaDocument;
use super::path::{FieldPath, PathSegment};
use super::type_ref::{TypeName, TypeRef};
use crate::error::{Error, Result};

/// Resolve a base type name plus a field path to a concrete type reference
///
/// Walks the path left to right. `NON_NULL` wrappers unwrap transparently
/// before each step. A `LIST` switches to its element type; the index
/// segment, when present, is consumed purely as an iteration marker, so the
/// resolved element type is uniform regardless of index value. Object kinds
/// consume one segment via exact-name field lookup. A trailing `NON_NULL`
/// on the final field is preserved — nullability semantics belong to the
/// caller.
///
/// # Errors
/// [`Error::UnknownType`] when the base name is not in the document,
/// [`Error::UnknownField`] when a segment names no declared field, and
/// [`Error::InvalidType`] when traversal reaches a scalar or enum with path
/// segments remaining.
pub fn resolve_type(
    document: &SchemaDocument,
    base: &TypeName,
    path: &FieldPath,
) -> Result<TypeRef> {
    let mut current = document.require_type(base)?.as_type_ref();
    let segments = path.segments();
    let mut at = 0;

    while at < segments.len() {
        match current {
            TypeRef::NonNull(inner) => {
                // Transparent for traversal; only nullability downstream
                current = *inner;
            }
            TypeRef::List(inner) => {
                if matches!(segments[at], PathSegment::Index(_)) {
                    at += 1;
                }
                current = *inner;
            }
            TypeRef::Object(ref name) | TypeRef::InputObject(ref name) => {
                let PathSegment::Field(ref field_name) = segments[at] else {
                    return Err(Report::new(Error::InvalidPath(format!(
                        "index segment against object type {name} in '{path}'"
                    ))));
                };
                let type_def = document.require_type(name)?;
                let field = type_def.field(field_name).ok_or_else(|| {
                    Report::new(Error::UnknownField {
                        type_name: name.clone(),
                        field:     field_name.clone(),
                    })
                })?;
                current = field.type_ref.clone();
                at += 1;
            }
            TypeRef::Scalar(ref name) | TypeRef::Enum(ref name) => {
                let remaining = &segments[at..];
                return Err(Report::new(Error::cannot_descend(
                    name,
                    format!("{} segment(s) of '{path}'", remaining.len()),
                )));
            }
        }
    }

    Ok(current)
}
