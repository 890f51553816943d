//! Form binding — a form instance editing one root domain object
//!
//! Owns the isolated working copy and exposes per-field contexts to the
//! rendering layer. The rendering layer calls the change handler with the
//! raw new value on every user edit and never mutates the working copy
//! directly.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::submit::SubmitDebouncer;
use super::value_path::value_at;
use crate::context::{FormContext, FormId, RootId};
use crate::convert::{Direction, ScalarConverters, convert_value};
use crate::error::Result;
use crate::isolate::{CloneEngine, TypeDescriptors};
use crate::schema::{FieldPath, SchemaDocument, TypeName, TypeRef, resolve_type};

/// Default quiet period for debounced auto-submit
const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(300);

/// Field information handed to a high-level validator
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Qualified path string, `Type.a.0.b`
    pub qualified_path: String,
    /// The field's resolved type reference
    pub type_ref:       TypeRef,
}

/// Caller-supplied validation run after type and required checks pass
pub type HighLevelValidator = Rc<dyn Fn(&FieldInfo, &str) -> Vec<String>>;

/// Per-form configuration
#[derive(Clone, Default)]
pub struct FormOptions {
    /// High-level validator appended to the message list when configured
    pub validator:   Option<HighLevelValidator>,
    /// Quiet period for auto-submit; `None` disables auto-submit
    pub auto_submit: Option<Duration>,
}

impl std::fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOptions")
            .field("validator", &self.validator.is_some())
            .field("auto_submit", &self.auto_submit)
            .finish()
    }
}

/// Snapshot of one field's state, exposed to the rendering layer
#[derive(Debug, Clone)]
pub struct FieldContext {
    /// Parsed field path
    pub path:           FieldPath,
    /// Qualified path string, `Type.a.0.b`
    pub qualified_path: String,
    /// The field's resolved type reference
    pub type_ref:       TypeRef,
    /// Current editable value — the last raw input while in error,
    /// the converted committed value otherwise
    pub editable_value: Value,
    /// Current error messages, empty when the field is valid
    pub messages:       Vec<String>,
}

/// A form instance bound to one root domain object
pub struct FormBinding {
    document:     Arc<SchemaDocument>,
    converters:   Arc<ScalarConverters>,
    descriptors:  Arc<TypeDescriptors>,
    context:      FormContext,
    form_id:      FormId,
    root_id:      RootId,
    root_type:    TypeName,
    working_copy: Value,
    options:      FormOptions,
    debouncer:    SubmitDebouncer,
}

impl std::fmt::Debug for FormBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormBinding")
            .field("form_id", &self.form_id)
            .field("root_id", &self.root_id)
            .field("root_type", &self.root_type)
            .finish_non_exhaustive()
    }
}

impl FormBinding {
    /// Mount a form over a root domain object
    ///
    /// Clones the root into an isolated working copy; the original is not
    /// touched again until [`Self::commit_to`].
    ///
    /// # Errors
    /// Clone-engine configuration errors (untagged objects, unknown types).
    pub fn new(
        document: Arc<SchemaDocument>,
        converters: Arc<ScalarConverters>,
        descriptors: Arc<TypeDescriptors>,
        context: FormContext,
        root_type: impl Into<TypeName>,
        root_object: &Value,
        root_id: RootId,
        options: FormOptions,
    ) -> Result<Self> {
        let working_copy =
            CloneEngine::new(&document, &descriptors).clone_object(root_object)?;
        let form_id = context.assign_form();
        let delay = options.auto_submit.unwrap_or(DEFAULT_SUBMIT_DELAY);
        Ok(Self {
            document,
            converters,
            descriptors,
            context,
            form_id,
            root_id,
            root_type: root_type.into(),
            working_copy,
            options,
            debouncer: SubmitDebouncer::new(delay),
        })
    }

    /// This form instance's identity
    pub const fn form_id(&self) -> FormId {
        self.form_id
    }

    /// The root identity scoping this form's errors
    pub const fn root_id(&self) -> RootId {
        self.root_id
    }

    /// The isolated working copy being edited
    pub const fn working_copy(&self) -> &Value {
        &self.working_copy
    }

    /// The shared context this form posts errors into
    pub const fn context(&self) -> &FormContext {
        &self.context
    }

    /// The debounce token protocol for the host's timer
    pub const fn debouncer(&self) -> &SubmitDebouncer {
        &self.debouncer
    }

    /// Build the field context for a path expression
    ///
    /// Registers the field in the error store so teardown can reclaim it.
    ///
    /// # Errors
    /// Configuration errors from path parsing or type resolution.
    pub fn field(&self, expr: &str) -> Result<FieldContext> {
        let path = FieldPath::parse(expr)?;
        let type_ref = resolve_type(&self.document, &self.root_type, &path)?;
        let path_key = path.to_string();
        self.context
            .errors_mut()
            .register_field(self.form_id, self.root_id, &path_key);

        let stored = self.context.find_error(self.root_id, &path_key);
        let (editable_value, messages) = if stored.is_empty() {
            (self.editable_at(&path, &type_ref)?, Vec::new())
        } else {
            // A field in error redisplays the last raw keystrokes
            (
                Value::String(stored[0].clone()),
                stored[1..].to_vec(),
            )
        };

        Ok(FieldContext {
            qualified_path: path.qualified(&self.root_type),
            path,
            type_ref,
            editable_value,
            messages,
        })
    }

    /// Post an externally produced error message for a field
    ///
    /// For collaborators outside the change pipeline, e.g. an error
    /// summary or a server-side validation result. A fresh entry is
    /// seeded with the field's current editable value, so redisplay
    /// shows the committed content rather than wiping it; an existing
    /// entry keeps its raw value and the message is appended.
    ///
    /// # Errors
    /// Configuration errors from path parsing or type resolution.
    pub fn add_error(&self, expr: &str, message: impl Into<String>) -> Result<()> {
        let path = FieldPath::parse(expr)?;
        let type_ref = resolve_type(&self.document, &self.root_type, &path)?;
        let path_key = path.to_string();
        self.context
            .errors_mut()
            .register_field(self.form_id, self.root_id, &path_key);

        let current = match self.editable_at(&path, &type_ref)? {
            Value::String(text) => text,
            other => other.to_string(),
        };
        self.context
            .errors_mut()
            .add_error(self.root_id, &path_key, message, Some(current));
        Ok(())
    }

    /// Blur performs no validation — a placeholder hook point only;
    /// validation is exclusively change-driven
    pub fn handle_blur(&self, _expr: &str) {}

    /// Commit the working copy's field values back onto the original
    ///
    /// # Errors
    /// Clone-engine configuration errors.
    pub fn commit_to(&self, original: &mut Value) -> Result<()> {
        CloneEngine::new(&self.document, &self.descriptors)
            .update_object(&self.working_copy, original)
    }

    /// Replace the working copy when the root object identity changes
    ///
    /// Pending debounced submits for the old root are cancelled.
    ///
    /// # Errors
    /// Clone-engine configuration errors.
    pub fn reset_root(&mut self, root_object: &Value, root_id: RootId) -> Result<()> {
        self.working_copy =
            CloneEngine::new(&self.document, &self.descriptors).clone_object(root_object)?;
        self.debouncer.cancel();
        self.root_id = root_id;
        Ok(())
    }

    /// Tear down the form instance
    ///
    /// Cancels any pending debounced submit and removes this form's field
    /// registrations and exclusively-owned errors from the store.
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.context.errors_mut().unregister_form(self.form_id);
    }

    /// The committed editable value at a path
    fn editable_at(&self, path: &FieldPath, type_ref: &TypeRef) -> Result<Value> {
        let domain = value_at(&self.working_copy, path)
            .cloned()
            .unwrap_or(Value::Null);
        convert_value(
            &self.document,
            &self.converters,
            type_ref,
            &domain,
            Direction::ToEditable,
        )
    }

    pub(super) const fn document(&self) -> &Arc<SchemaDocument> {
        &self.document
    }

    pub(super) const fn converters(&self) -> &Arc<ScalarConverters> {
        &self.converters
    }

    pub(super) const fn root_type(&self) -> &TypeName {
        &self.root_type
    }

    pub(super) const fn options(&self) -> &FormOptions {
        &self.options
    }

    pub(super) fn working_copy_mut(&mut self) -> &mut Value {
        &mut self.working_copy
    }
}
