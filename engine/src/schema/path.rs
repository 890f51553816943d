//! Field paths — dotted/bracketed expressions into a value tree
//!
//! A path is an ordered sequence of field names and array indices, parsed
//! from expressions like `"fields.0.maxLength"` or `"fields[0].maxLength"`.
//! A path of length 0 denotes the object itself.

use crate::error::{Error, Result};
use crate::schema::TypeName;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descend into a named field
    Field(String),
    /// Step over a list element — the element type is uniform, so the
    /// index only marks iteration, never affects resolution
    Index(usize),
}

/// An ordered sequence of path segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path — the object itself
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a dotted/bracketed path expression
    ///
    /// Accepts `"a.b"`, `"a.0.b"` and `"a[0].b"` forms; the empty string
    /// parses to the empty path.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`] for unbalanced brackets, empty
    /// segments, or non-numeric indices.
    pub fn parse(expr: &str) -> Result<Self> {
        let mut segments = Vec::new();
        if expr.is_empty() {
            return Ok(Self { segments });
        }
        for chunk in expr.split('.') {
            if chunk.is_empty() {
                return Err(error_stack::Report::new(Error::InvalidPath(format!(
                    "empty segment in '{expr}'"
                ))));
            }
            Self::parse_chunk(chunk, expr, &mut segments)?;
        }
        Ok(Self { segments })
    }

    /// Split one dot-separated chunk into a field name and bracket indices
    fn parse_chunk(chunk: &str, expr: &str, segments: &mut Vec<PathSegment>) -> Result<()> {
        let invalid = |detail: &str| {
            error_stack::Report::new(Error::InvalidPath(format!("{detail} in '{expr}'")))
        };

        let (head, mut rest) = chunk.find('[').map_or((chunk, ""), |at| chunk.split_at(at));
        if !head.is_empty() {
            if let Ok(index) = head.parse::<usize>() {
                segments.push(PathSegment::Index(index));
            } else {
                segments.push(PathSegment::Field(head.to_string()));
            }
        } else if rest.is_empty() {
            return Err(invalid("empty segment"));
        }
        while let Some(stripped) = rest.strip_prefix('[') {
            let Some(close) = stripped.find(']') else {
                return Err(invalid("unbalanced bracket"));
            };
            let index = stripped[..close]
                .parse::<usize>()
                .map_err(|_| invalid("non-numeric index"))?;
            segments.push(PathSegment::Index(index));
            rest = &stripped[close + 1..];
        }
        if !rest.is_empty() {
            return Err(invalid("trailing characters after bracket"));
        }
        Ok(())
    }

    /// The segments in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the empty path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Qualified form used in validation messages: `Type.a.0.b`
    pub fn qualified(&self, root_type: &TypeName) -> String {
        if self.is_root() {
            root_type.to_string()
        } else {
            format!("{root_type}.{self}")
        }
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            first = false;
            match segment {
                PathSegment::Field(name) => write!(f, "{name}")?,
                PathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}
