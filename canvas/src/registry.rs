//! Resource ID registry.
//!
//! Browser-resident resources (images, gradients, patterns, pixel buffers)
//! are addressed by small integer IDs. One session-wide counter feeds every
//! kind, so no two live resources share an ID even across kinds, and a
//! released ID is never reissued — a stale handle can at worst name a freed
//! object, never a different live one. The live map remembers which kind
//! owns each ID so releases are checked against the kind that allocated.

use std::collections::HashMap;

use wire::ResourceKind;

use crate::error::SessionError;

/// Per-session ID registry covering all four resource kinds.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    next: u32,
    live: HashMap<u32, ResourceKind>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID for `kind`. IDs start at 1, are unique across
    /// kinds, and are never reused.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IdSpaceExhausted`] if the counter wraps,
    /// which is fatal to the session.
    pub(crate) fn alloc(&mut self, kind: ResourceKind) -> Result<u32, SessionError> {
        let id = self
            .next
            .checked_add(1)
            .ok_or(SessionError::IdSpaceExhausted { kind })?;
        self.next = id;
        self.live.insert(id, kind);
        Ok(id)
    }

    /// Remove `id` from the live set. Returns whether it was live as
    /// `kind`; releasing an already-released ID is a no-op.
    pub(crate) fn release(&mut self, kind: ResourceKind, id: u32) -> bool {
        match self.live.get(&id) {
            Some(live_kind) if *live_kind == kind => {
                self.live.remove(&id);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_live(&self, kind: ResourceKind, id: u32) -> bool {
        self.live.get(&id) == Some(&kind)
    }

    #[cfg(test)]
    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
