//! Driven port for invoice writes.

use async_trait::async_trait;

use crate::domain::{InvoiceDraft, InvoiceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by invoice repository adapters.
    pub enum InvoiceRepositoryError => "invoice repository";
}

/// Port for single-statement invoice mutations.
///
/// Each call issues exactly one parameterised statement; there are no
/// transactions spanning calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice and return its generated id.
    async fn insert(&self, draft: &InvoiceDraft) -> Result<InvoiceId, InvoiceRepositoryError>;

    /// Overwrite every mutable column of invoice `id`; returns affected rows.
    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<usize, InvoiceRepositoryError>;

    /// Delete invoice `id`; returns affected rows.
    async fn delete(&self, id: &InvoiceId) -> Result<usize, InvoiceRepositoryError>;
}

/// Fixture implementation that accepts writes without storing them.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInvoiceRepository;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl InvoiceRepository for FixtureInvoiceRepository {
    async fn insert(&self, _draft: &InvoiceDraft) -> Result<InvoiceId, InvoiceRepositoryError> {
        Ok(InvoiceId::random())
    }

    async fn update(
        &self,
        _id: &InvoiceId,
        _draft: &InvoiceDraft,
    ) -> Result<usize, InvoiceRepositoryError> {
        Ok(0)
    }

    async fn delete(&self, _id: &InvoiceId) -> Result<usize, InvoiceRepositoryError> {
        Ok(0)
    }
}
