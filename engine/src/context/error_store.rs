//! Error store — validation errors shared across cooperating forms
//!
//! A registry of validation errors keyed by `(root identity, field path)`.
//! At most one entry exists per key; `messages[0]` is always the last raw
//! value the user entered for the field (so invalid input can be
//! redisplayed without being lost) and the field is in error iff
//! `messages.len() > 1`. Multiple form instances may post into the same
//! store; interleaved writes to unrelated paths never clobber each other.

use tracing::trace;

use super::identity::{FormId, RootId};

const EMPTY: &[String] = &[];

/// One error entry for a `(root, path)` scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Root object scope
    pub root:     RootId,
    /// Dotted field path within the root
    pub path:     String,
    /// `[last raw user value, error message, ...]`
    pub messages: Vec<String>,
}

impl ErrorEntry {
    /// Whether the entry currently represents an error state
    pub fn in_error(&self) -> bool {
        self.messages.len() > 1
    }
}

/// A field registration tying a `(root, path)` scope to a form instance
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldRegistration {
    form: FormId,
    root: RootId,
    path: String,
}

/// Registry of validation errors and field registrations
#[derive(Debug, Default)]
pub struct ErrorStore {
    entries:       Vec<ErrorEntry>,
    registrations: Vec<FieldRegistration>,
}

impl ErrorStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error message for a `(root, path)` scope
    ///
    /// Creates the entry seeded with `[raw_value, message]` when absent;
    /// appends `message` otherwise. Pass the field's current editable
    /// content as `raw_value` so redisplay never wipes committed state
    /// ([`FormBinding::add_error`](crate::form::FormBinding::add_error)
    /// does this). Repeated identical messages are appended, not
    /// deduplicated — de-duplication is the caller's call.
    pub fn add_error(
        &mut self,
        root: RootId,
        path: &str,
        message: impl Into<String>,
        raw_value: Option<String>,
    ) {
        let message = message.into();
        if let Some(at) = self.find_error_index(root, path) {
            self.entries[at].messages.push(message);
        } else {
            self.entries.push(ErrorEntry {
                root,
                path: path.to_string(),
                messages: vec![raw_value.unwrap_or_default(), message],
            });
        }
    }

    /// Remove the entry for a `(root, path)` scope; no-op when absent
    pub fn remove_errors(&mut self, root: RootId, path: &str) {
        if let Some(at) = self.find_error_index(root, path) {
            self.entries.remove(at);
        }
    }

    /// Replace or remove the entry based on the message list
    ///
    /// Idempotent: a list with more than one element (raw value plus at
    /// least one message) replaces or creates the entry; anything shorter
    /// removes it.
    pub fn update_errors(&mut self, root: RootId, path: &str, messages: Vec<String>) {
        if messages.len() > 1 {
            if let Some(at) = self.find_error_index(root, path) {
                self.entries[at].messages = messages;
            } else {
                self.entries.push(ErrorEntry {
                    root,
                    path: path.to_string(),
                    messages,
                });
            }
        } else {
            self.remove_errors(root, path);
        }
    }

    /// Message list for a scope, empty when the field has no entry
    pub fn find_error(&self, root: RootId, path: &str) -> &[String] {
        self.find_error_index(root, path)
            .map_or(EMPTY, |at| &self.entries[at].messages)
    }

    /// Index of the entry for a scope, if present
    pub fn find_error_index(&self, root: RootId, path: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.root == root && entry.path == path)
    }

    /// Whether any entry exists, across all roots
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Every entry, across all roots
    pub fn all_errors(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Every entry scoped to one root, for error-summary collaborators
    pub fn errors_for_root(&self, root: RootId) -> Vec<&ErrorEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.root == root)
            .collect()
    }

    /// Remove every entry for a root, leaving other roots untouched
    pub fn clear_errors(&mut self, root: RootId) {
        self.entries.retain(|entry| entry.root != root);
    }

    /// Record that a form instance edits a `(root, path)` scope
    pub fn register_field(&mut self, form: FormId, root: RootId, path: &str) {
        let registration = FieldRegistration {
            form,
            root,
            path: path.to_string(),
        };
        if !self.registrations.contains(&registration) {
            self.registrations.push(registration);
        }
    }

    /// Tear down a form instance
    ///
    /// Removes its field registrations and every error entry whose path
    /// was owned exclusively by that form — entries for paths another
    /// live form also registered are kept.
    pub fn unregister_form(&mut self, form: FormId) {
        let mut owned = Vec::new();
        self.registrations.retain(|registration| {
            if registration.form == form {
                owned.push((registration.root, registration.path.clone()));
                false
            } else {
                true
            }
        });
        for (root, path) in owned {
            let shared = self
                .registrations
                .iter()
                .any(|registration| registration.root == root && registration.path == path);
            if !shared {
                trace!(%root, path, "dropping error entry on form teardown");
                self.remove_errors(root, &path);
            }
        }
    }
}
