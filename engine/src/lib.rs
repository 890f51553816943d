//! Schema-driven form binding engine for typed data graphs
//!
//! The engine underneath every form field: it resolves dotted/indexed
//! paths against a type graph, converts between domain values and their
//! user-editable representation, tracks per-field validation errors
//! across cooperating forms, and isolates in-progress edits on a
//! copy-on-write working copy so they can be committed or discarded
//! atomically.
//!
//! The schema document is supplied by the caller as JSON; domain and
//! editable values are `serde_json::Value` trees, with objects carrying a
//! `_type` tag naming their schema type. Rendering, DOM events and the
//! reactive substrate live outside this crate and talk to it through
//! [`form::FieldContext`] and the [`context::FormContext`] query surface.

pub mod constants;
pub mod context;
pub mod convert;
pub mod error;
pub mod form;
pub mod isolate;
pub mod json_access;
pub mod schema;

pub use context::{ErrorEntry, ErrorStore, FormContext, FormId, RootId};
pub use convert::{ConverterEntry, Direction, ScalarConverters, convert_value, default_converters};
pub use error::{Error, Result};
pub use form::{ChangeOutcome, FieldContext, FormBinding, FormOptions, SubmitDebouncer};
pub use isolate::{CloneEngine, TypeDescriptors};
pub use schema::{FieldPath, SchemaDocument, TypeName, TypeRef, resolve_type};
