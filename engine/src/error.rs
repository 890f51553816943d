//! Error types for the form binding engine
//!
//! Only configuration and structural errors live here — a schema/caller
//! mismatch that must abort the operation that triggered it. Field
//! validation failures are data, not errors: they are absorbed into the
//! [`ErrorStore`](crate::context::ErrorStore) and never bubble.

use thiserror::Error;

use crate::schema::TypeName;

// Error message prefixes
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_MISSING_PREFIX: &str = "Missing";

/// Result type for the `formgraph` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Configuration and structural error categories
#[derive(Debug, Error)]
pub enum Error {
    /// A named type is not present in the schema document
    #[error("Unknown type: {type_name}")]
    UnknownType {
        /// The type name that failed to resolve
        type_name: TypeName,
    },

    /// A path segment names a field the type does not declare
    #[error("Unknown field '{field}' on type {type_name}")]
    UnknownField {
        /// The type whose field list was searched
        type_name: TypeName,
        /// The field name that was not found
        field:     String,
    },

    /// Traversal descended into a type that has no fields
    #[error("Invalid type for traversal: {0}")]
    InvalidType(String),

    /// A path expression could not be parsed
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A scalar type was edited without a registered converter entry
    #[error("No converter registered for scalar type: {type_name}")]
    UnregisteredScalar {
        /// The scalar type name missing from the registry
        type_name: TypeName,
    },

    /// An object value carries no `_type` tag, so its shape is unknown
    #[error("Missing type tag: {0}")]
    MissingTypeTag(String),

    /// The schema document itself is malformed
    #[error("Schema error: {0}")]
    SchemaInvalid(String),

    /// A value does not match the shape its schema type declares
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    // Builder methods for common patterns

    /// Create an "Invalid X" structural value error
    pub fn invalid_value(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidValue(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create an error for an object value missing its `_type` tag
    pub fn missing_type_tag(context: impl std::fmt::Display) -> Self {
        Self::MissingTypeTag(format!("{MSG_MISSING_PREFIX} '_type' tag: {context}"))
    }

    /// Create an error for descending into a scalar or enum type
    pub fn cannot_descend(type_name: &TypeName, remaining: impl std::fmt::Display) -> Self {
        Self::InvalidType(format!(
            "cannot descend into leaf type {type_name} with path remaining: {remaining}"
        ))
    }
}
