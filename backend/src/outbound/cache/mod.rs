//! In-process view cache adapter.
//!
//! Tracks a revision counter per view path. Nothing rendered is stored; a
//! reader compares the revision it saw last with the current one.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::domain::ports::ViewCache;

/// [`ViewCache`] keeping revisions in a process-local map.
#[derive(Debug, Default)]
pub struct InMemoryViewCache {
    revisions: Mutex<HashMap<String, u64>>,
}

impl InMemoryViewCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewCache for InMemoryViewCache {
    fn invalidate(&self, view: &str) {
        let mut revisions = self
            .revisions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let revision = revisions.entry(view.to_owned()).or_insert(0);
        *revision = revision.saturating_add(1);
        debug!(view, revision = *revision, "view invalidated");
    }

    fn revision(&self, view: &str) -> u64 {
        self.revisions
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(view)
            .copied()
            .unwrap_or(0)
    }
}
