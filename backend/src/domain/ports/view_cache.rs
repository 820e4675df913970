//! Driven port for invalidating rendered views after a mutation.
//!
//! Views are identified by their route path. Only a revision counter is
//! tracked; readers compare revisions to decide whether a cached rendering
//! is still current.

/// Route path of the invoice list view.
pub const INVOICES_VIEW: &str = "/dashboard/invoices";

#[cfg_attr(test, mockall::automock)]
pub trait ViewCache: Send + Sync {
    /// Mark `view` stale; bumps its revision.
    fn invalidate(&self, view: &str);

    /// Current revision of `view`; zero until first invalidated.
    fn revision(&self, view: &str) -> u64;
}

/// Cache that never tracks anything.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureViewCache;

#[cfg(any(test, feature = "test-support"))]
impl ViewCache for FixtureViewCache {
    fn invalidate(&self, _view: &str) {}

    fn revision(&self, _view: &str) -> u64 {
        0
    }
}
