//! Value-tree navigation by field path
//!
//! Working copies are schema-shaped, so intermediate containers are
//! expected to exist; a missing step is a structural error, not an
//! occasion to auto-create shape the schema did not put there.

use error_stack::Report;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::{FieldPath, PathSegment};

/// Read the value at a path, `None` when any step is absent
pub fn value_at<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match segment {
            PathSegment::Field(name) => current.get(name.as_str())?,
            PathSegment::Index(index) => current.get(index)?,
        };
    }
    Some(current)
}

/// Write a value at a path, replacing whatever was there
///
/// # Errors
/// [`Error::InvalidValue`] when an intermediate step is missing or the
/// final container does not accept the segment (object field vs list
/// index), and [`Error::InvalidPath`] for the empty path — the object
/// itself is not assignable.
pub fn write_at(root: &mut Value, path: &FieldPath, value: Value) -> Result<()> {
    let segments = path.segments();
    let Some((last, walk)) = segments.split_last() else {
        return Err(Report::new(Error::InvalidPath(
            "cannot assign to the empty path".to_string(),
        )));
    };

    let mut current = root;
    for segment in walk {
        current = match segment {
            PathSegment::Field(name) => current.get_mut(name.as_str()),
            PathSegment::Index(index) => current.get_mut(index),
        }
        .ok_or_else(|| {
            Report::new(Error::invalid_value(
                "path step",
                format!("no value at segment {segment:?} of '{path}'"),
            ))
        })?;
    }

    match last {
        PathSegment::Field(name) => {
            let Some(map) = current.as_object_mut() else {
                return Err(Report::new(Error::invalid_value(
                    "assignment target",
                    format!("expected an object at parent of '{path}'"),
                )));
            };
            map.insert(name.clone(), value);
        }
        PathSegment::Index(index) => {
            let Some(items) = current.as_array_mut() else {
                return Err(Report::new(Error::invalid_value(
                    "assignment target",
                    format!("expected an array at parent of '{path}'"),
                )));
            };
            let Some(slot) = items.get_mut(*index) else {
                return Err(Report::new(Error::invalid_value(
                    "list index",
                    format!("index {index} out of bounds in '{path}'"),
                )));
            };
            *slot = value;
        }
    }
    Ok(())
}
