//! Type references — the tagged variants a schema document wires fields with
//!
//! A [`TypeRef`] mirrors the JSON literal form consumed from schema
//! documents: leaf kinds carry a `name` resolvable in the document, wrapper
//! kinds (`LIST`, `NON_NULL`) carry a nested `ofType` reference.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

/// A newtype wrapper for schema type names used as lookup keys
///
/// Provides documentation and type safety for strings that name a type
/// declared in a schema document (e.g. `"DomainType"`, `"Int"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for TypeName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TypeName> for Value {
    fn from(type_name: TypeName) -> Self {
        Self::String(type_name.0)
    }
}

impl From<&TypeName> for Value {
    fn from(type_name: &TypeName) -> Self {
        Self::String(type_name.0.clone())
    }
}

/// Category of type — the `kind` discriminant in schema documents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// Leaf scalar type (String, Int, Currency, ...)
    Scalar,
    /// Enumeration type — values pass through conversion unchanged
    Enum,
    /// Output object type with a `fields` list
    Object,
    /// Input object type with an `inputFields` list
    InputObject,
    /// Homogeneous list wrapper around an element type
    List,
    /// Non-null wrapper — affects nullability semantics, not traversal
    NonNull,
}

/// A reference from a field declaration to a type
///
/// Immutable and owned by the schema document. `List` and `NonNull` always
/// carry an inner reference; the leaf kinds always carry a name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTypeRef")]
pub enum TypeRef {
    /// `SCALAR{name}`
    Scalar(TypeName),
    /// `ENUM{name}`
    Enum(TypeName),
    /// `OBJECT{name}`
    Object(TypeName),
    /// `INPUT_OBJECT{name}`
    InputObject(TypeName),
    /// `LIST{ofType}`
    List(Box<TypeRef>),
    /// `NON_NULL{ofType}`
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The kind discriminant of this reference
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::Object(_) => TypeKind::Object,
            Self::InputObject(_) => TypeKind::InputObject,
            Self::List(_) => TypeKind::List,
            Self::NonNull(_) => TypeKind::NonNull,
        }
    }

    /// Whether the outermost wrapper is `NON_NULL`
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Strip any `NON_NULL` wrappers, yielding the wrapped reference
    pub fn unwrap_non_null(&self) -> &Self {
        let mut current = self;
        while let Self::NonNull(inner) = current {
            current = inner;
        }
        current
    }

    /// The declared name for leaf kinds, `None` for wrappers
    pub const fn named(&self) -> Option<&TypeName> {
        match self {
            Self::Scalar(name) | Self::Enum(name) | Self::Object(name) | Self::InputObject(name) => {
                Some(name)
            }
            Self::List(_) | Self::NonNull(_) => None,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(name) | Self::Enum(name) | Self::Object(name) | Self::InputObject(name) => {
                write!(f, "{name}")
            }
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Wire form of a type reference before shape validation
#[derive(Debug, Deserialize)]
struct RawTypeRef {
    kind:    TypeKind,
    #[serde(default)]
    name:    Option<TypeName>,
    #[serde(default, rename = "ofType")]
    of_type: Option<Box<RawTypeRef>>,
}

impl TryFrom<RawTypeRef> for TypeRef {
    type Error = String;

    fn try_from(raw: RawTypeRef) -> Result<Self, Self::Error> {
        match raw.kind {
            TypeKind::Scalar | TypeKind::Enum | TypeKind::Object | TypeKind::InputObject => {
                let name = raw
                    .name
                    .ok_or_else(|| format!("{} type reference requires a 'name'", raw.kind))?;
                Ok(match raw.kind {
                    TypeKind::Scalar => Self::Scalar(name),
                    TypeKind::Enum => Self::Enum(name),
                    TypeKind::Object => Self::Object(name),
                    _ => Self::InputObject(name),
                })
            }
            TypeKind::List | TypeKind::NonNull => {
                let of_type = raw
                    .of_type
                    .ok_or_else(|| format!("{} type reference requires an 'ofType'", raw.kind))?;
                let inner = Box::new(Self::try_from(*of_type)?);
                Ok(if raw.kind == TypeKind::List {
                    Self::List(inner)
                } else {
                    Self::NonNull(inner)
                })
            }
        }
    }
}
