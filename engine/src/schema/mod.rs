//! Schema document, type references, field paths and type resolution
//!
//! The schema document is supplied by the caller at startup and is
//! read-only thereafter. Everything in this module is pure: resolution
//! never mutates and never caches.

mod document;
mod path;
mod resolver;
mod type_ref;

pub use document::{EnumValueDef, FieldDef, SchemaDocument, TypeDef};
pub use path::{FieldPath, PathSegment};
pub use resolver::resolve_type;
pub use type_ref::{TypeKind, TypeName, TypeRef};
