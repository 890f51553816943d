//! Working-copy isolation — schema-shaped deep cloning of domain objects
//!
//! Edits happen on an isolated working copy produced here, then are either
//! committed back onto the original object or discarded.

mod clone;
mod descriptors;

pub use clone::CloneEngine;
pub use descriptors::{ObjectFactory, PlainClone, TypeDescriptors};
