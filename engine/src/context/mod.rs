//! Form context — the shared scope cooperating forms post errors into
//!
//! Bundles the error store and the identity arena behind a cheaply
//! clonable handle. The engine runs on a single-threaded UI event loop,
//! so interior mutability is `RefCell`; every mutation completes within
//! one borrow, which keeps the store consistent under interleaved writes
//! from sibling forms within an event tick.

mod error_store;
mod identity;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub use error_store::{ErrorEntry, ErrorStore};
pub use identity::{FormId, IdentityArena, RootId};

/// Shared context scoping error state across cooperating forms
///
/// Clones share the same underlying store; independent contexts are fully
/// isolated (avoiding hidden cross-test leakage while preserving the
/// "register once, use everywhere" ergonomics of a caller-scoped scope).
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    inner: Rc<ContextInner>,
}

#[derive(Debug, Default)]
struct ContextInner {
    errors:     RefCell<ErrorStore>,
    identities: RefCell<IdentityArena>,
}

impl FormContext {
    /// A fresh, empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a root identity for a root domain object
    pub fn assign_root(&self) -> RootId {
        self.inner.identities.borrow_mut().assign_root()
    }

    /// Release a root identity and drop every error scoped to it
    ///
    /// The surrounding application calls this when a root object is
    /// discarded; identities are never collected automatically.
    pub fn release_root(&self, root: RootId) {
        if self.inner.identities.borrow_mut().release_root(root) {
            self.inner.errors.borrow_mut().clear_errors(root);
        }
    }

    /// Assign an identity for a newly mounted form instance
    pub fn assign_form(&self) -> FormId {
        self.inner.identities.borrow_mut().assign_form()
    }

    /// Immutable access to the error store
    pub fn errors(&self) -> Ref<'_, ErrorStore> {
        self.inner.errors.borrow()
    }

    /// Mutable access to the error store
    pub fn errors_mut(&self) -> RefMut<'_, ErrorStore> {
        self.inner.errors.borrow_mut()
    }

    /// Message list for a `(root, path)` scope — external query surface
    pub fn find_error(&self, root: RootId, path: &str) -> Vec<String> {
        self.errors().find_error(root, path).to_vec()
    }

    /// Every error entry for a root — external query surface
    pub fn errors_for_root(&self, root: RootId) -> Vec<ErrorEntry> {
        self.errors()
            .errors_for_root(root)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_store() {
        let context = FormContext::new();
        let alias = context.clone();
        let root = context.assign_root();
        context.errors_mut().add_error(root, "x", "err", None);
        assert_eq!(alias.find_error(root, "x").len(), 2);
    }

    #[test]
    fn independent_contexts_are_isolated() {
        let first = FormContext::new();
        let second = FormContext::new();
        let root = first.assign_root();
        first.errors_mut().add_error(root, "x", "err", None);
        assert!(second.find_error(root, "x").is_empty());
    }

    #[test]
    fn releasing_a_root_drops_its_errors() {
        let context = FormContext::new();
        let keep = context.assign_root();
        let drop = context.assign_root();
        context.errors_mut().add_error(keep, "x", "err", None);
        context.errors_mut().add_error(drop, "x", "err", None);
        context.release_root(drop);
        assert!(context.find_error(drop, "x").is_empty());
        assert!(!context.find_error(keep, "x").is_empty());
    }
}
