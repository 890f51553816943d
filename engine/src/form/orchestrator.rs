//! Field change orchestration — the per-keystroke validation pipeline
//!
//! Combines the resolver, the scalar converter registry, the working copy
//! and the error store for a single field edit. The steps run in fixed
//! order and the first failing step short-circuits the rest; rejected
//! edits never reach the working copy.

use error_stack::Report;
use serde_json::Value;

use super::binding::{FieldInfo, FormBinding};
use super::submit::SubmitTicket;
use super::value_path::write_at;
use crate::constants::MSG_FIELD_REQUIRED;
use crate::error::{Error, Result};
use crate::schema::{FieldPath, TypeRef, resolve_type};

/// Result of one change event
#[derive(Debug, Clone)]
pub struct ChangeOutcome {
    /// Whether the converted value was written into the working copy
    pub committed: bool,
    /// Error messages for the field after this edit, empty when valid
    pub messages:  Vec<String>,
    /// Ticket for the debounced auto-submit scheduled by this edit
    pub submit:    Option<SubmitTicket>,
}

impl FormBinding {
    /// Handle a raw input change for the field at a path expression
    ///
    /// Fixed order: resolve the type (fatal when unresolvable — a
    /// configuration error, never stored as a field error), run scalar
    /// validation, check non-null required-ness for empty input, run the
    /// high-level validator, then either commit the converted value into
    /// the working copy or leave the previous committed value untouched.
    /// Finally the error store is updated to exactly reflect the message
    /// list, and a successful edit schedules the debounced auto-submit
    /// when one is configured.
    ///
    /// # Errors
    /// Configuration errors only; validation failures are returned in the
    /// outcome's message list and stored, never thrown.
    pub fn handle_change(&mut self, expr: &str, raw: &str) -> Result<ChangeOutcome> {
        let path = FieldPath::parse(expr)?;
        let type_ref = resolve_type(self.document(), self.root_type(), &path)?;
        let path_key = path.to_string();
        let qualified = path.qualified(self.root_type());
        self.context()
            .errors_mut()
            .register_field(self.form_id(), self.root_id(), &path_key);

        let mut messages: Vec<String> = Vec::new();
        let unwrapped = type_ref.unwrap_non_null().clone();

        // Scalar type validation; raw value preserved verbatim on failure
        if let TypeRef::Scalar(name) = &unwrapped {
            if let Some(message) = self.converters().validate(&name, raw)? {
                messages.push(message);
            }
        }

        // Required-ness is orthogonal to type validity
        if messages.is_empty() && type_ref.is_non_null() && raw.is_empty() {
            messages.push(format!("{qualified}:{MSG_FIELD_REQUIRED}"));
        }

        if messages.is_empty() {
            if let Some(validator) = self.options().validator.clone() {
                let info = FieldInfo {
                    qualified_path: qualified,
                    type_ref:       type_ref.clone(),
                };
                messages.extend(validator(&info, raw));
            }
        }

        let committed = messages.is_empty();
        if committed {
            let converted = self.convert_raw(&unwrapped, raw)?;
            write_at(self.working_copy_mut(), &path, converted)?;
        }

        let mut stored = Vec::with_capacity(messages.len() + 1);
        stored.push(raw.to_string());
        stored.extend(messages.iter().cloned());
        self.context()
            .errors_mut()
            .update_errors(self.root_id(), &path_key, stored);

        let submit = (committed && self.options().auto_submit.is_some())
            .then(|| self.debouncer().schedule());

        Ok(ChangeOutcome {
            committed,
            messages,
            submit,
        })
    }

    /// Convert a validated raw value to its domain form
    fn convert_raw(&self, unwrapped: &TypeRef, raw: &str) -> Result<Value> {
        match unwrapped {
            TypeRef::Scalar(name) => self
                .converters()
                .to_scalar(name, &Value::String(raw.to_string())),
            TypeRef::Enum(_) => Ok(if raw.is_empty() {
                Value::Null
            } else {
                Value::String(raw.to_string())
            }),
            other => Err(Report::new(Error::invalid_value(
                "change target",
                format!("field edits expect a leaf type, got {other}"),
            ))),
        }
    }
}
