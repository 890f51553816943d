//! Root and form identity — stable integers scoping error lookups
//!
//! A root identity is assigned once per root domain object and stays with
//! it for the object's lifetime, so two forms editing different roots
//! never see each other's errors while forms sharing one root share one
//! error scope. Identity is released explicitly when the surrounding
//! application discards the root; nothing is collected automatically.

use std::collections::HashSet;

/// Stable identity of a root domain object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(u64);

impl std::fmt::Display for RootId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "root#{}", self.0)
    }
}

/// Identity of a single mounted form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(u64);

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "form#{}", self.0)
    }
}

/// Monotonic arena handing out root and form identities
///
/// Identifiers are never reused; release only marks a root as no longer
/// live so stale handles can be detected.
#[derive(Debug, Default)]
pub struct IdentityArena {
    next_root: u64,
    next_form: u64,
    live:      HashSet<RootId>,
}

impl IdentityArena {
    /// An arena with no assigned identities
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next root identity
    pub fn assign_root(&mut self) -> RootId {
        let id = RootId(self.next_root);
        self.next_root += 1;
        self.live.insert(id);
        id
    }

    /// Release a root identity when its object is discarded
    ///
    /// Returns whether the identity was live. Releasing twice is a no-op.
    pub fn release_root(&mut self, root: RootId) -> bool {
        self.live.remove(&root)
    }

    /// Whether a root identity is still live
    pub fn is_live(&self, root: RootId) -> bool {
        self.live.contains(&root)
    }

    /// Assign the next form instance identity
    pub fn assign_form(&mut self) -> FormId {
        let id = FormId(self.next_form);
        self.next_form += 1;
        id
    }
}
